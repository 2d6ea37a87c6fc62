//! Error types for h5mark-core.

use thiserror::Error;

/// Result type alias for mark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for mark operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Mark bounds are reversed.
    #[error("invalid mark bounds: xmin ({xmin}) > xmax ({xmax})")]
    InvalidBounds { xmin: f64, xmax: f64 },

    /// Mark bound is NaN or infinite.
    #[error("mark bound is not a finite number: {0}")]
    NonFiniteBound(f64),

    /// Candidate mark properly intersects an existing one.
    #[error("mark [{xmin}, {xmax}] overlaps existing mark #{existing}")]
    Collision {
        /// Position of the existing mark in the collection.
        existing: usize,
        xmin: f64,
        xmax: f64,
    },

    /// Operation on a mark or row that does not exist.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A settings value could not be parsed.
    #[error("invalid {field}: {reason}")]
    ConfigParse { field: &'static str, reason: String },

    /// A mark was requested without an active span selection.
    #[error("no span selected on the chart")]
    NoSelection,

    /// Dataset matrix is malformed.
    #[error("dataset error: {0}")]
    Dataset(String),
}
