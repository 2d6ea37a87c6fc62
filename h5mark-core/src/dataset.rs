//! Tabular dataset with an X column.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Largest precision for which rounding changes an `f64`.
const ROUNDING_LIMIT: usize = 15;

/// A rows × columns numeric matrix with one header per column.
///
/// Values are stored row-major. Column 0 is the X axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    values: Vec<f64>,
    n_cols: usize,
}

/// Shape and X extent of a dataset, for reporting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub headers: Vec<String>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
}

impl Dataset {
    /// Creates a dataset from headers and row-major values.
    ///
    /// # Errors
    /// Returns [`Error::Dataset`] if there are no columns or the value count
    /// is not a multiple of the column count.
    pub fn new(headers: Vec<String>, values: Vec<f64>) -> Result<Self> {
        let n_cols = headers.len();
        if n_cols == 0 {
            return Err(Error::Dataset(
                "dataset needs at least an X column".to_string(),
            ));
        }
        if values.len() % n_cols != 0 {
            return Err(Error::Dataset(format!(
                "{} values do not fill {} columns",
                values.len(),
                n_cols
            )));
        }
        Ok(Self {
            headers,
            values,
            n_cols,
        })
    }

    /// Creates a dataset from a list of rows.
    ///
    /// # Errors
    /// Returns [`Error::Dataset`] if any row length differs from the header
    /// count.
    pub fn from_rows(headers: Vec<String>, rows: &[Vec<f64>]) -> Result<Self> {
        let n_cols = headers.len();
        let mut values = Vec::with_capacity(rows.len() * n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(Error::Dataset(format!(
                    "row {i} has {} values, expected {n_cols}",
                    row.len()
                )));
            }
            values.extend_from_slice(row);
        }
        Self::new(headers, values)
    }

    /// Creates a dataset from equal-length columns; the first is X.
    ///
    /// # Errors
    /// Returns [`Error::Dataset`] on length mismatches.
    pub fn from_columns(headers: Vec<String>, columns: &[Vec<f64>]) -> Result<Self> {
        if headers.len() != columns.len() {
            return Err(Error::Dataset(format!(
                "{} headers for {} columns",
                headers.len(),
                columns.len()
            )));
        }
        let n_rows = columns.first().map_or(0, Vec::len);
        if let Some((i, col)) = columns
            .iter()
            .enumerate()
            .find(|(_, col)| col.len() != n_rows)
        {
            return Err(Error::Dataset(format!(
                "column '{}' has {} values, expected {n_rows}",
                headers[i],
                col.len()
            )));
        }

        let mut values = Vec::with_capacity(n_rows * columns.len());
        for row in 0..n_rows {
            values.extend(columns.iter().map(|col| col[row]));
        }
        Self::new(headers, values)
    }

    pub fn n_rows(&self) -> usize {
        self.values.len() / self.n_cols
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header(&self, col: usize) -> Option<&str> {
        self.headers.get(col).map(String::as_str)
    }

    /// All cells, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns one row, or `None` past the end.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        let start = row.checked_mul(self.n_cols)?;
        let end = start.checked_add(self.n_cols)?;
        self.values.get(start..end)
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.n_cols)
    }

    /// Iterates over one column.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        let skip = if col < self.n_cols {
            col
        } else {
            self.values.len()
        };
        self.values.iter().skip(skip).step_by(self.n_cols).copied()
    }

    /// Iterates over the X column.
    pub fn x_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.column(0)
    }

    /// Smallest and largest X value.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        self.x_values().fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
    }

    /// Rounds every cell to `precision` decimal places, in place.
    pub fn round_to(&mut self, precision: usize) {
        if precision > ROUNDING_LIMIT {
            return;
        }
        let exp = i32::try_from(precision).unwrap_or(i32::MAX);
        let scale = 10f64.powi(exp);
        for value in &mut self.values {
            let scaled = *value * scale;
            if scaled.is_finite() {
                *value = scaled.round() / scale;
            }
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        let range = self.x_range();
        DatasetSummary {
            rows: self.n_rows(),
            columns: self.n_cols,
            headers: self.headers.clone(),
            x_min: range.map(|(lo, _)| lo),
            x_max: range.map(|(_, hi)| hi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_shape_and_rows() {
        let ds = Dataset::new(headers(&["t", "a", "b"]), (0..9).map(f64::from).collect()).unwrap();
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.n_cols(), 3);
        assert_eq!(ds.row(1), Some(&[3.0, 4.0, 5.0][..]));
        assert_eq!(ds.row(3), None);
        assert_eq!(ds.x_values().collect::<Vec<_>>(), vec![0.0, 3.0, 6.0]);
        assert_eq!(ds.column(2).collect::<Vec<_>>(), vec![2.0, 5.0, 8.0]);
        assert_eq!(ds.column(7).count(), 0);
        assert_eq!(ds.rows().count(), 3);
    }

    #[test]
    fn test_rejects_ragged_input() {
        assert!(Dataset::new(Vec::new(), vec![]).is_err());
        assert!(Dataset::new(headers(&["x", "y"]), vec![1.0, 2.0, 3.0]).is_err());
        assert!(Dataset::from_rows(headers(&["x", "y"]), &[vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(
            Dataset::from_columns(headers(&["x", "y"]), &[vec![1.0, 2.0], vec![3.0]]).is_err()
        );
    }

    #[test]
    fn test_from_columns_interleaves() {
        let ds = Dataset::from_columns(
            headers(&["x", "y"]),
            &[vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]],
        )
        .unwrap();
        assert_eq!(ds.row(2), Some(&[3.0, 30.0][..]));
    }

    #[test]
    fn test_empty_dataset_keeps_headers() {
        let ds = Dataset::new(headers(&["x"]), Vec::new()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.n_rows(), 0);
        assert_eq!(ds.x_range(), None);
    }

    #[test]
    fn test_round_to() {
        let mut ds = Dataset::from_rows(
            headers(&["x", "y"]),
            &[vec![1.23456, -2.71828], vec![0.5, 1e307]],
        )
        .unwrap();
        ds.round_to(2);
        let row0 = ds.row(0).unwrap();
        assert_relative_eq!(row0[0], 1.23);
        assert_relative_eq!(row0[1], -2.72);
        // Values that overflow when scaled are left alone.
        assert_relative_eq!(ds.row(1).unwrap()[1], 1e307);

        ds.round_to(0);
        assert_relative_eq!(ds.row(0).unwrap()[0], 1.0);
    }

    #[test]
    fn test_summary() {
        let ds = Dataset::from_rows(headers(&["x", "y"]), &[vec![3.0, 0.0], vec![-1.0, 0.0]])
            .unwrap();
        let summary = ds.summary();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.x_min, Some(-1.0));
        assert_eq!(summary.x_max, Some(3.0));
    }
}
