//! HDF5 dataset loading.
//!
//! Three layouts are understood:
//!
//! 1. a 1-D dataset of compound records (a table), where the field names are
//!    the column headers and the first field is X;
//! 2. a 2-D numeric dataset (rows × columns), with column names taken from a
//!    string-array attribute `columns` when present;
//! 3. a group of equal-length 1-D numeric datasets, one per column, where the
//!    group's `axes` attribute (NXdata style) names the X column.
//!
//! Numeric element types are converted to `f64` by the HDF5 library.

use crate::{Error, Result};
use h5mark_core::Dataset;
use hdf5::types::{CompoundField, CompoundType, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Datatype, File, Group, Location};
use hdf5_sys::{h5d::H5Dread, h5p::H5P_DEFAULT, h5s::H5S_ALL};
use log::{debug, info, warn};
use ndarray::{ArrayView1, ArrayView2};
use std::path::Path;
use std::str::FromStr;

/// Attribute holding column names of a 2-D dataset.
const COLUMNS_ATTR: &str = "columns";
/// Attribute naming the X dataset of a column group.
const AXES_ATTR: &str = "axes";

/// Lists the top-level members of a file in storage order.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub fn list_members<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    Ok(file.member_names()?)
}

/// Reads a dataset from an HDF5 file.
///
/// With `name` unset the first top-level member is loaded.
///
/// # Errors
/// Returns an error if the file cannot be read or the selected member is not
/// one of the supported layouts.
pub fn read_dataset_hdf5<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let name = match name {
        Some(name) => name.to_string(),
        None => file
            .member_names()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidFormat(format!("{} has no members", path.display())))?,
    };

    let dataset = if let Ok(ds) = file.dataset(&name) {
        match ds.dtype()?.to_descriptor() {
            Ok(TypeDescriptor::Compound(table)) => read_compound_table(&ds, &name, &table)?,
            _ => read_matrix(&ds, &name)?,
        }
    } else if let Ok(group) = file.group(&name) {
        read_column_group(&group, &name)?
    } else {
        return Err(Error::InvalidFormat(format!(
            "'{name}' is neither a dataset nor a group"
        )));
    };

    info!(
        "Read '{name}' from {}: {} rows x {} columns",
        path.display(),
        dataset.n_rows(),
        dataset.n_cols()
    );
    Ok(dataset)
}

/// Writes `dataset` as a 2-D dataset with a `columns` attribute.
///
/// # Errors
/// Returns an error if HDF5 I/O fails.
pub fn write_dataset_hdf5<P: AsRef<Path>>(path: P, name: &str, dataset: &Dataset) -> Result<()> {
    let file = File::create(path)?;
    let shape = (dataset.n_rows(), dataset.n_cols());
    let view = ArrayView2::from_shape(shape, dataset.values())
        .map_err(|e| Error::InvalidFormat(format!("dataset shape mismatch: {e}")))?;

    let ds = file.new_dataset::<f64>().shape(shape).create(name)?;
    ds.write(view)?;
    set_string_array_attr(&ds, COLUMNS_ATTR, dataset.headers())?;
    Ok(())
}

/// Writes `dataset` as a group of 1-D datasets with an `axes` attribute.
///
/// # Errors
/// Returns an error if HDF5 I/O fails or headers repeat.
pub fn write_group_hdf5<P: AsRef<Path>>(path: P, name: &str, dataset: &Dataset) -> Result<()> {
    let file = File::create(path)?;
    let group = file.create_group(name)?;
    for (col, header) in dataset.headers().iter().enumerate() {
        let values: Vec<f64> = dataset.column(col).collect();
        let ds = group
            .new_dataset::<f64>()
            .shape((values.len(),))
            .create(header.as_str())?;
        ds.write(ArrayView1::from(values.as_slice()))?;
    }
    if let Some(x) = dataset.header(0) {
        set_string_array_attr(&group, AXES_ATTR, &[x.to_string()])?;
    }
    Ok(())
}

fn read_compound_table(ds: &hdf5::Dataset, name: &str, table: &CompoundType) -> Result<Dataset> {
    if ds.ndim() != 1 {
        return Err(Error::InvalidFormat(format!(
            "'{name}' is a {}-D compound dataset, expected one record per row",
            ds.ndim()
        )));
    }
    let mut fields: Vec<&CompoundField> = table.fields.iter().collect();
    fields.sort_by_key(|field| field.index);
    if let Some(field) = fields.iter().find(|field| !is_numeric(&field.ty)) {
        return Err(Error::InvalidFormat(format!(
            "'{name}' field '{}' is not numeric",
            field.name
        )));
    }

    let headers: Vec<String> = fields.iter().map(|field| field.name.clone()).collect();
    let cols = headers.len();
    let rows = ds.size();
    let mut values = vec![0.0_f64; rows * cols];
    if rows > 0 {
        read_as_f64_records(ds, &headers, &mut values)
            .map_err(|e| Error::InvalidFormat(format!("'{name}': {e}")))?;
    }
    debug!("'{name}': {rows} records of {cols} fields");
    Ok(Dataset::new(headers, values)?)
}

fn is_numeric(ty: &TypeDescriptor) -> bool {
    matches!(
        ty,
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) | TypeDescriptor::Float(_)
    )
}

/// Reads all records of `ds` into `out`, row-major, through a memory type of
/// `f64` fields named after `fields`. HDF5 matches fields by name and does
/// the numeric conversion.
#[allow(unsafe_code)]
fn read_as_f64_records(
    ds: &hdf5::Dataset,
    fields: &[String],
    out: &mut [f64],
) -> std::result::Result<(), String> {
    let width = std::mem::size_of::<f64>();
    let mem_type = Datatype::from_descriptor(&TypeDescriptor::Compound(CompoundType {
        fields: fields
            .iter()
            .enumerate()
            .map(|(i, field)| CompoundField::typed::<f64>(field, i * width, i))
            .collect(),
        size: fields.len() * width,
    }))
    .map_err(|e| e.to_string())?;
    if out.len() != ds.size() * fields.len() {
        return Err(format!("buffer holds {} values", out.len()));
    }

    // SAFETY: `out` holds exactly one `mem_type` record per element of `ds`.
    let status = hdf5::sync::sync(|| unsafe {
        H5Dread(
            ds.id(),
            mem_type.id(),
            H5S_ALL,
            H5S_ALL,
            H5P_DEFAULT,
            out.as_mut_ptr().cast(),
        )
    });
    if status < 0 {
        return Err("records could not be converted to f64".to_string());
    }
    Ok(())
}

fn read_matrix(ds: &hdf5::Dataset, name: &str) -> Result<Dataset> {
    let shape = ds.shape();
    let (rows, cols) = match shape.as_slice() {
        [rows, cols] => (*rows, *cols),
        _ => {
            return Err(Error::InvalidFormat(format!(
                "'{name}' is {}-D, expected a rows x columns table",
                shape.len()
            )))
        }
    };
    let values = ds.read_raw::<f64>()?;
    debug!("'{name}': {rows} x {cols} matrix");

    let headers = match read_string_array_attr(ds, COLUMNS_ATTR) {
        Some(names) if names.len() == cols => names,
        Some(names) => {
            warn!(
                "'{name}' lists {} column names for {cols} columns; using defaults",
                names.len()
            );
            default_headers(cols)
        }
        None => default_headers(cols),
    };
    Ok(Dataset::new(headers, values)?)
}

fn read_column_group(group: &Group, name: &str) -> Result<Dataset> {
    let mut columns: Vec<(String, Vec<f64>)> = Vec::new();
    for member in group.member_names()? {
        let Ok(ds) = group.dataset(&member) else {
            debug!("'{name}/{member}' is not a dataset; skipped");
            continue;
        };
        if ds.ndim() != 1 {
            debug!("'{name}/{member}' is {}-D; skipped", ds.ndim());
            continue;
        }
        columns.push((member, ds.read_raw::<f64>()?));
    }
    if columns.is_empty() {
        return Err(Error::InvalidFormat(format!(
            "group '{name}' has no 1-D datasets"
        )));
    }

    let axis = read_string_array_attr(group, AXES_ATTR)
        .and_then(|axes| axes.into_iter().next())
        .and_then(|axis| columns.iter().position(|(member, _)| *member == axis));
    if let Some(pos) = axis {
        let x = columns.remove(pos);
        columns.insert(0, x);
    }

    let (headers, data): (Vec<String>, Vec<Vec<f64>>) = columns.into_iter().unzip();
    Ok(Dataset::from_columns(headers, &data)?)
}

fn default_headers(cols: usize) -> Vec<String> {
    (0..cols)
        .map(|i| if i == 0 { "x".to_string() } else { format!("y{i}") })
        .collect()
}

/// Reads a string or string-array attribute, `None` if absent or unreadable.
fn read_string_array_attr(location: &Location, name: &str) -> Option<Vec<String>> {
    let attr = location.attr(name).ok()?;
    if let Ok(values) = attr.read_raw::<VarLenUnicode>() {
        return Some(values.iter().map(|v| v.as_str().to_string()).collect());
    }
    match attr.read_raw::<VarLenAscii>() {
        Ok(values) => Some(values.iter().map(|v| v.as_str().to_string()).collect()),
        Err(e) => {
            warn!("Ignoring attribute '{name}': {e}");
            None
        }
    }
}

fn set_string_array_attr(location: &Location, name: &str, values: &[String]) -> Result<()> {
    let values: Vec<VarLenUnicode> = values
        .iter()
        .map(|value| {
            VarLenUnicode::from_str(value)
                .map_err(|e| Error::InvalidFormat(format!("invalid utf-8 attribute: {e}")))
        })
        .collect::<Result<_>>()?;
    let attr = location
        .new_attr::<VarLenUnicode>()
        .shape((values.len(),))
        .create(name)?;
    attr.write(ArrayView1::from(values.as_slice()))?;
    Ok(())
}
