//! Chart rendering: data series and mark overlays.

mod graph;
mod overlay;

pub use graph::{draw_series, y_extent, GraphKind};
pub use overlay::{draw_span, PlotOverlayManager};
