//! Application state modules.

mod dialog;
mod ui;

pub use dialog::{MarkDialog, MarkDialogKind, SettingsDialog};
pub use ui::UiState;
