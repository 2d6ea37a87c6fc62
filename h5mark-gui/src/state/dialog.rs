//! Editable state of the mark and settings dialogs.
//!
//! Dialog fields hold raw text so the user can type freely; parsing happens
//! once, when the dialog is confirmed.

use eframe::egui::Color32;
use h5mark_core::{Mark, Settings};

use crate::util::{from_color32, to_color32};

/// What confirming the mark dialog does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkDialogKind {
    /// Commit the pending chart selection as a new mark.
    Create,
    /// Replace the mark at this position.
    Edit(usize),
}

/// Bounds and color of a mark being created or edited.
#[derive(Debug, Clone)]
pub struct MarkDialog {
    pub kind: MarkDialogKind,
    pub xmin: String,
    pub xmax: String,
    pub color: Color32,
    /// Problem with the last confirmation attempt.
    pub error: Option<String>,
}

impl MarkDialog {
    pub fn new(kind: MarkDialogKind, mark: &Mark) -> Self {
        Self {
            kind,
            xmin: mark.xmin().to_string(),
            xmax: mark.xmax().to_string(),
            color: to_color32(mark.color()),
            error: None,
        }
    }

    /// Builds the mark described by the fields.
    pub fn parse(&self) -> Result<Mark, String> {
        let xmin = parse_bound("xmin", &self.xmin)?;
        let xmax = parse_bound("xmax", &self.xmax)?;
        Mark::new(xmin, xmax, from_color32(self.color)).map_err(|e| e.to_string())
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            MarkDialogKind::Create => "New mark",
            MarkDialogKind::Edit(_) => "Edit mark",
        }
    }
}

fn parse_bound(name: &str, text: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| format!("{name}: '{}' is not a number", text.trim()))
}

/// Text fields of the settings dialog.
#[derive(Debug, Clone, Default)]
pub struct SettingsDialog {
    pub delimiter: String,
    pub precision: String,
    pub error: Option<String>,
}

impl SettingsDialog {
    pub fn new(settings: Settings) -> Self {
        let delimiter = match settings.delimiter() {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        };
        Self {
            delimiter,
            precision: settings.precision().to_string(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h5mark_core::Rgba;

    #[test]
    fn test_mark_dialog_roundtrip() {
        let mark = Mark::new(1.25, 3.5, Rgba::ORANGE).unwrap();
        let dialog = MarkDialog::new(MarkDialogKind::Create, &mark);
        assert_eq!(dialog.xmin, "1.25");
        assert_eq!(dialog.parse(), Ok(mark));
    }

    #[test]
    fn test_mark_dialog_reports_bad_input() {
        let mark = Mark::new(0.0, 1.0, Rgba::RED).unwrap();
        let mut dialog = MarkDialog::new(MarkDialogKind::Edit(0), &mark);

        dialog.xmax = "one".to_string();
        assert!(dialog.parse().unwrap_err().contains("xmax"));

        dialog.xmax = "-1".to_string();
        assert!(dialog.parse().is_err());
    }

    #[test]
    fn test_settings_dialog_escapes_tab() {
        let dialog = SettingsDialog::new(Settings::new('\t', 2).unwrap());
        assert_eq!(dialog.delimiter, "\\t");
        assert_eq!(dialog.precision, "2");
    }
}
