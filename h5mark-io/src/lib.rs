//! h5mark-io: File I/O for h5mark.
//!
//! Loads tabular datasets from HDF5 files (behind the `hdf5` feature) and
//! exports annotated rows to delimited text via the csv crate.
//!

mod error;
mod export;
#[cfg(feature = "hdf5")]
pub mod hdf5;

pub use error::{Error, Result};
pub use export::{CsvExporter, MARK_COLUMN};
#[cfg(feature = "hdf5")]
pub use hdf5::{list_members, read_dataset_hdf5, write_dataset_hdf5, write_group_hdf5};
