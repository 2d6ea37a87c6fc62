//! UI state for view options and selection.

use crate::viewer::GraphKind;

/// UI toggles that are not part of the mark session.
pub struct UiState {
    /// How series are drawn.
    pub graph_kind: GraphKind,
    /// Primary drag selects an X span instead of panning.
    pub selection_mode: bool,
    /// Row of the marks list the user clicked last.
    pub selected_mark: Option<usize>,
    /// Whether the data table panel is visible.
    pub show_table: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            graph_kind: GraphKind::default(),
            selection_mode: true,
            selected_mark: None,
            show_table: true,
        }
    }
}
