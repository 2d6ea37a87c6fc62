//! UI rendering modules.
//!
//! Contains the UI rendering logic split into separate modules:
//! - `control_panel`: Top bar and left sidebar with the marks list
//! - `main_view`: Central panel with the chart and span selection
//! - `data_table`: Bottom panel with mark-highlighted rows
//! - `dialogs`: Mark, settings and notice windows

mod control_panel;
mod data_table;
mod dialogs;
mod main_view;
pub mod theme;
