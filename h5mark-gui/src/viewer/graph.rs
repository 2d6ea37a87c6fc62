//! Series drawing for the loaded dataset.

use egui_plot::{Line, PlotPoints, PlotUi, Points};
use h5mark_core::Dataset;

/// How every Y column is plotted against X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphKind {
    #[default]
    Line,
    Scatter,
}

impl GraphKind {
    pub const ALL: [Self; 2] = [Self::Line, Self::Scatter];

    pub fn label(self) -> &'static str {
        match self {
            Self::Line => "Plot",
            Self::Scatter => "Scatter",
        }
    }
}

/// `[x, y]` pairs of one Y column.
fn series_points(dataset: &Dataset, col: usize) -> Vec<[f64; 2]> {
    dataset
        .x_values()
        .zip(dataset.column(col))
        .map(|(x, y)| [x, y])
        .collect()
}

/// Draws columns `1..` against column 0, one legend entry per column.
pub fn draw_series(plot_ui: &mut PlotUi, dataset: &Dataset, kind: GraphKind) {
    for col in 1..dataset.n_cols() {
        let name = dataset.header(col).unwrap_or_default();
        let points = PlotPoints::new(series_points(dataset, col));
        match kind {
            GraphKind::Line => plot_ui.line(Line::new(points).name(name)),
            GraphKind::Scatter => plot_ui.points(Points::new(points).name(name).radius(2.5)),
        }
    }
}

/// Smallest and largest finite Y value across all series.
pub fn y_extent(dataset: &Dataset) -> Option<(f64, f64)> {
    (1..dataset.n_cols())
        .flat_map(|col| dataset.column(col))
        .filter(|y| y.is_finite())
        .fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
}
