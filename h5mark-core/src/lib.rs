//! h5mark-core: Region-of-interest marks over tabular scientific data.
//!
//! This crate provides the mark model used by the h5mark tools: colored
//! X-axis intervals, the non-overlapping collection that owns them, the
//! per-row index derived from a dataset, and the session that keeps all of
//! them consistent.
//!

pub mod collection;
pub mod color;
pub mod dataset;
pub mod error;
pub mod index;
pub mod mark;
pub mod selection;
pub mod session;
pub mod settings;

pub use collection::MarkCollection;
pub use color::Rgba;
pub use dataset::{Dataset, DatasetSummary};
pub use error::{Error, Result};
pub use index::RowMarkIndex;
pub use mark::{Mark, MARK_ALPHA};
pub use selection::{SelectionState, SpanSelection};
pub use session::Session;
pub use settings::{Settings, SettingsChange, DEFAULT_DELIMITER, DEFAULT_PRECISION, MAX_PRECISION};
