//! Main application state and logic.
//!
//! Contains the `H5MarkApp` struct which owns the mark session, the chart
//! selection and the dialog state, and turns user actions into session calls.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use eframe::egui;
use h5mark_core::{Session, SpanSelection};
use h5mark_io::CsvExporter;
use log::info;

use crate::message::Notice;
use crate::state::{MarkDialog, MarkDialogKind, SettingsDialog, UiState};
use crate::ui::theme;
use crate::util::random_mark_color;
use crate::viewer::PlotOverlayManager;

/// Main application state.
pub struct H5MarkApp {
    /// Loaded dataset, marks and settings.
    pub(crate) session: Session,
    /// Span being dragged on the chart, or awaiting confirmation.
    pub(crate) selection: SpanSelection,
    /// Chart overlays mirroring `session.marks()`.
    pub(crate) overlays: PlotOverlayManager,

    /// Currently loaded file path.
    pub(crate) selected_file: Option<PathBuf>,
    /// UI display state.
    pub(crate) ui_state: UiState,

    /// Open mark create/edit dialog.
    pub(crate) mark_dialog: Option<MarkDialog>,
    /// Open settings dialog.
    pub(crate) settings_dialog: Option<SettingsDialog>,
    /// Modal message waiting to be dismissed.
    pub(crate) notice: Option<Notice>,

    /// Text shown in the top bar.
    pub(crate) status_text: String,
}

impl Default for H5MarkApp {
    fn default() -> Self {
        Self {
            session: Session::default(),
            selection: SpanSelection::new(),
            overlays: PlotOverlayManager::default(),
            selected_file: None,
            ui_state: UiState::default(),
            mark_dialog: None,
            settings_dialog: None,
            notice: None,
            status_text: "Ready".to_string(),
        }
    }
}

impl H5MarkApp {
    /// Load a dataset from an HDF5 file, replacing the current one.
    ///
    /// Marks from the previous dataset are discarded.
    pub fn load_file(&mut self, path: PathBuf) {
        let loaded = h5mark_io::read_dataset_hdf5(&path, None)
            .with_context(|| format!("Failed to read {}", path.display()));

        match loaded {
            Ok(dataset) => {
                let rows = dataset.n_rows();
                self.session.load_dataset(dataset);
                self.selection.cancel();
                self.ui_state.selected_mark = None;
                self.status_text = format!(
                    "Loaded {} rows from {}",
                    crate::util::format_number(rows),
                    file_name(&path)
                );
                self.selected_file = Some(path);
                self.sync_views();
            }
            Err(e) => {
                self.status_text = "Load failed".to_string();
                self.notice = Some(Notice::error("Open file", format!("{e:#}")));
            }
        }
    }

    /// Write the dataset and its mark colors to `path` as CSV.
    pub fn export_csv(&mut self, path: &Path) {
        let written = CsvExporter::new(self.session.settings())
            .export_to_path(path, &self.session)
            .with_context(|| format!("Failed to export {}", path.display()));

        match written {
            Ok(rows) => {
                self.status_text = format!("Exported {rows} rows to {}", file_name(path));
                self.notice = Some(Notice::info("Export", format!("Wrote {rows} rows.")));
            }
            Err(e) => {
                self.notice = Some(Notice::error("Export", format!("{e:#}")));
            }
        }
    }

    /// Turn the chart selection into a new-mark dialog.
    pub fn begin_add_mark(&mut self) {
        let color = random_mark_color(&mut rand::thread_rng());
        match self.selection.propose(color, self.session.marks()) {
            Ok(mark) => {
                self.mark_dialog = Some(MarkDialog::new(MarkDialogKind::Create, &mark));
            }
            Err(h5mark_core::Error::NoSelection) => {
                self.notice = Some(Notice::info(
                    "Add mark",
                    "Drag across the chart to select an X range first.",
                ));
            }
            Err(e) => {
                self.notice = Some(Notice::error("Add mark", e.to_string()));
            }
        }
    }

    /// Open the edit dialog for the mark at `index`.
    pub fn begin_edit_mark(&mut self, index: usize) {
        if let Some(mark) = self.session.marks().get(index) {
            self.mark_dialog = Some(MarkDialog::new(MarkDialogKind::Edit(index), mark));
        }
    }

    pub fn delete_mark(&mut self, index: usize) {
        match self.session.delete_mark(index) {
            Ok(removed) => {
                self.status_text = format!("Deleted mark {removed}");
                self.ui_state.selected_mark = None;
                self.sync_views();
            }
            Err(e) => self.notice = Some(Notice::error("Delete mark", e.to_string())),
        }
    }

    /// Apply the mark dialog.
    ///
    /// Bad input keeps the dialog open with the problem shown inline. A
    /// rejected new mark closes the dialog, since its selection is gone.
    pub fn confirm_mark_dialog(&mut self) {
        let Some(dialog) = self.mark_dialog.as_mut() else {
            return;
        };
        let mark = match dialog.parse() {
            Ok(mark) => mark,
            Err(e) => {
                dialog.error = Some(e);
                return;
            }
        };

        match dialog.kind {
            MarkDialogKind::Create => {
                self.mark_dialog = None;
                match self.session.commit_selection(&mut self.selection, mark) {
                    Ok(index) => {
                        self.status_text = format!("Added mark #{}", index + 1);
                        self.sync_views();
                    }
                    Err(e) => self.notice = Some(Notice::error("Add mark", e.to_string())),
                }
            }
            MarkDialogKind::Edit(index) => match self.session.replace_mark(index, mark) {
                Ok(_) => {
                    self.mark_dialog = None;
                    self.status_text = format!("Updated mark #{}", index + 1);
                    self.sync_views();
                }
                Err(e) => dialog.error = Some(e.to_string()),
            },
        }
    }

    /// Close the mark dialog without changes.
    pub fn cancel_mark_dialog(&mut self) {
        if let Some(dialog) = self.mark_dialog.take() {
            if dialog.kind == MarkDialogKind::Create {
                self.selection.cancel();
            }
        }
    }

    pub fn open_settings_dialog(&mut self) {
        self.settings_dialog = Some(SettingsDialog::new(self.session.settings()));
    }

    /// Apply the settings dialog; invalid input keeps it open.
    pub fn confirm_settings_dialog(&mut self) {
        let Some(dialog) = self.settings_dialog.as_mut() else {
            return;
        };
        match self
            .session
            .update_settings(&dialog.delimiter, &dialog.precision)
        {
            Ok(change) => {
                self.settings_dialog = None;
                if change.any() {
                    let settings = self.session.settings();
                    info!(
                        "Settings: delimiter {:?}, precision {}",
                        settings.delimiter(),
                        settings.precision()
                    );
                    self.status_text = "Settings updated".to_string();
                }
            }
            Err(e) => dialog.error = Some(e.to_string()),
        }
    }

    /// Rebuild views derived from the mark collection.
    pub fn sync_views(&mut self) {
        self.overlays.sync(self.session.marks());
    }

    /// Whether a modal window blocks the main view.
    pub fn has_modal(&self) -> bool {
        self.mark_dialog.is_some() || self.settings_dialog.is_some() || self.notice.is_some()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

impl eframe::App for H5MarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        theme::apply_system_theme(ctx);
        self.render_top_panel(ctx);
        self.render_side_panel(ctx);
        self.render_data_table(ctx);
        self.render_central_panel(ctx);
        self.render_dialogs(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::NoticeKind;
    use h5mark_core::{Dataset, Mark, Rgba};

    fn app_with_data() -> H5MarkApp {
        let mut app = H5MarkApp::default();
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![f64::from(i), 0.0]).collect();
        app.session
            .load_dataset(Dataset::from_rows(vec!["x".into(), "y".into()], &rows).unwrap());
        app
    }

    fn drag(app: &mut H5MarkApp, from: f64, to: f64) {
        app.selection.begin(from);
        app.selection.update(to);
        app.selection.release();
    }

    #[test]
    fn test_add_mark_without_selection() {
        let mut app = app_with_data();
        app.begin_add_mark();
        assert!(app.mark_dialog.is_none());
        assert_eq!(app.notice.map(|n| n.kind), Some(NoticeKind::Info));
    }

    #[test]
    fn test_add_mark_flow() {
        let mut app = app_with_data();
        drag(&mut app, 5.5, 2.5);
        app.begin_add_mark();

        let dialog = app.mark_dialog.as_mut().unwrap();
        assert_eq!(dialog.kind, MarkDialogKind::Create);
        dialog.xmax = "6".to_string();
        app.confirm_mark_dialog();

        assert!(app.mark_dialog.is_none());
        assert!(app.selection.is_idle());
        assert_eq!(app.session.marks().len(), 1);
        assert_eq!(app.overlays.len(), 1);
        assert_eq!(app.session.index().marked_count(), 4);
    }

    #[test]
    fn test_bad_input_stays_in_dialog() {
        let mut app = app_with_data();
        drag(&mut app, 1.0, 2.0);
        app.begin_add_mark();
        app.mark_dialog.as_mut().unwrap().xmin = "abc".to_string();
        app.confirm_mark_dialog();

        assert!(app.mark_dialog.as_ref().unwrap().error.is_some());
        assert!(!app.selection.is_idle());
        assert!(app.session.marks().is_empty());

        app.cancel_mark_dialog();
        assert!(app.selection.is_idle());
    }

    #[test]
    fn test_edited_collision_closes_create_dialog() {
        let mut app = app_with_data();
        app.session
            .add_mark(Mark::new(6.0, 8.0, Rgba::RED).unwrap())
            .unwrap();
        app.sync_views();

        drag(&mut app, 1.0, 2.0);
        app.begin_add_mark();
        app.mark_dialog.as_mut().unwrap().xmax = "7".to_string();
        app.confirm_mark_dialog();

        assert!(app.mark_dialog.is_none());
        assert!(app.selection.is_idle());
        assert_eq!(app.notice.map(|n| n.kind), Some(NoticeKind::Error));
        assert_eq!(app.session.marks().len(), 1);
        assert_eq!(app.overlays.len(), 1);
    }

    #[test]
    fn test_edit_collision_stays_inline() {
        let mut app = app_with_data();
        app.session
            .add_mark(Mark::new(0.0, 2.0, Rgba::RED).unwrap())
            .unwrap();
        app.session
            .add_mark(Mark::new(5.0, 7.0, Rgba::BLUE).unwrap())
            .unwrap();

        app.begin_edit_mark(0);
        app.mark_dialog.as_mut().unwrap().xmax = "6".to_string();
        app.confirm_mark_dialog();
        assert!(app.mark_dialog.as_ref().unwrap().error.is_some());
        assert_eq!(app.session.marks().get(0).unwrap().xmax(), 2.0);

        app.mark_dialog.as_mut().unwrap().xmax = "5".to_string();
        app.confirm_mark_dialog();
        assert!(app.mark_dialog.is_none());
        assert_eq!(app.session.marks().get(0).unwrap().xmax(), 5.0);
    }

    #[test]
    fn test_delete_updates_overlays() {
        let mut app = app_with_data();
        app.session
            .add_mark(Mark::new(0.0, 2.0, Rgba::RED).unwrap())
            .unwrap();
        app.sync_views();

        app.delete_mark(0);
        assert!(app.overlays.is_empty());
        assert_eq!(app.session.index().marked_count(), 0);

        app.delete_mark(0);
        assert_eq!(app.notice.map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn test_settings_dialog() {
        let mut app = app_with_data();
        app.open_settings_dialog();
        app.settings_dialog.as_mut().unwrap().precision = "x".to_string();
        app.confirm_settings_dialog();
        assert!(app.settings_dialog.as_ref().unwrap().error.is_some());

        let dialog = app.settings_dialog.as_mut().unwrap();
        dialog.precision = "2".to_string();
        dialog.delimiter = ",".to_string();
        app.confirm_settings_dialog();
        assert!(app.settings_dialog.is_none());
        assert_eq!(app.session.settings().delimiter(), ',');
        assert_eq!(app.session.settings().precision(), 2);
    }

    #[test]
    fn test_load_file_resets_marks_and_views() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("next.h5");
        let rows: Vec<Vec<f64>> = (0..4).map(|i| vec![f64::from(i), 1.0]).collect();
        let next = Dataset::from_rows(vec!["t".into(), "v".into()], &rows).unwrap();
        h5mark_io::write_dataset_hdf5(&path, "next", &next).unwrap();

        let mut app = app_with_data();
        app.session
            .add_mark(Mark::new(1.0, 3.0, Rgba::RED).unwrap())
            .unwrap();
        app.sync_views();
        app.ui_state.selected_mark = Some(0);
        drag(&mut app, 5.0, 6.0);
        assert_eq!(app.overlays.len(), 1);
        assert!(!app.selection.is_idle());

        app.load_file(path.clone());
        assert!(app.notice.is_none());
        assert_eq!(app.selected_file.as_deref(), Some(path.as_path()));
        assert_eq!(app.session.dataset().unwrap().headers(), &["t", "v"]);
        assert!(app.session.marks().is_empty());
        assert_eq!(app.session.index().marked_count(), 0);
        assert!(app.overlays.is_empty());
        assert!(app.selection.is_idle());
        assert!(app.ui_state.selected_mark.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let mut app = H5MarkApp::default();
        app.load_file(PathBuf::from("/nonexistent/data.h5"));
        assert!(app.selected_file.is_none());
        assert_eq!(app.notice.map(|n| n.kind), Some(NoticeKind::Error));
    }
}
