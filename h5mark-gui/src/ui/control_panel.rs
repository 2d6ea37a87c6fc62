//! Control panel (left sidebar) and top bar rendering.

use eframe::egui::{self, Color32, Rounding, Stroke};
use rfd::FileDialog;

use super::theme::{
    accent, form_label, primary_button, section_header, stat_label, stat_value, ThemeColors,
};
use crate::app::H5MarkApp;
use crate::util::{format_number, to_color32};
use crate::viewer::GraphKind;

impl H5MarkApp {
    /// Render the top bar with file actions and the status line.
    pub(crate) fn render_top_panel(&mut self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);

        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_header)
                    .inner_margin(egui::Margin::symmetric(16.0, 8.0)),
            )
            .show(ctx, |ui| {
                ui.set_min_height(32.0);
                ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(10.0, 0.0);
                    ui.add_enabled_ui(!self.has_modal(), |ui| {
                        self.render_top_bar_left(ui, colors);
                    });
                    let status_color = if self.selected_file.is_some() {
                        colors.text_muted
                    } else {
                        colors.text_primary
                    };
                    ui.label(egui::RichText::new(self.status_line()).color(status_color));
                });
            });
    }

    fn render_top_bar_left(&mut self, ui: &mut egui::Ui, colors: ThemeColors) {
        ui.label(
            egui::RichText::new("H5MARK")
                .size(14.0)
                .strong()
                .color(accent::BLUE),
        );
        Self::top_bar_separator(ui, colors);

        if ui.button("Open").on_hover_text("Open HDF5 file").clicked() {
            if let Some(path) = FileDialog::new()
                .add_filter("HDF5", &["h5", "hdf5"])
                .pick_file()
            {
                self.load_file(path);
            }
        }

        let can_export = self.session.dataset().is_some();
        if ui
            .add_enabled(can_export, egui::Button::new("Export"))
            .on_hover_text("Export rows and mark colors to CSV")
            .clicked()
        {
            if let Some(path) = FileDialog::new()
                .add_filter("CSV", &["csv"])
                .set_file_name("data.csv")
                .save_file()
            {
                self.export_csv(&path);
            }
        }

        if ui.button("Settings").clicked() {
            self.open_settings_dialog();
        }

        Self::top_bar_separator(ui, colors);
    }

    fn status_line(&self) -> String {
        match &self.selected_file {
            Some(path) => {
                let name = path.file_name().unwrap_or_default().to_string_lossy();
                format!("{name} • {}", self.status_text)
            }
            None => self.status_text.clone(),
        }
    }

    fn top_bar_separator(ui: &mut egui::Ui, colors: ThemeColors) {
        ui.add_space(2.0);
        ui.label(egui::RichText::new("│").size(14.0).color(colors.text_dim));
        ui.add_space(2.0);
    }

    /// Render the left panel: dataset info, view options and marks.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);

        egui::SidePanel::left("ctrl")
            .default_width(260.0)
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_panel)
                    .inner_margin(egui::Margin::same(12.0)),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(!self.has_modal(), |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            ui.label(section_header("Dataset"));
                            self.render_dataset_info(ui);
                            Self::section_divider(ui, colors);

                            ui.label(section_header("View"));
                            self.render_view_options(ui);
                            Self::section_divider(ui, colors);

                            ui.label(section_header("Marks"));
                            self.render_marks_list(ui, colors);
                        });
                });
            });
    }

    fn section_divider(ui: &mut egui::Ui, colors: ThemeColors) {
        ui.add_space(6.0);
        let rect = ui.available_rect_before_wrap();
        ui.painter().hline(
            rect.x_range(),
            rect.top(),
            Stroke::new(1.0, colors.border),
        );
        ui.add_space(8.0);
    }

    fn stat_row(ui: &mut egui::Ui, label: &str, value: &str) {
        ui.horizontal(|ui| {
            ui.label(stat_label(label));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(stat_value(value));
            });
        });
    }

    fn render_dataset_info(&self, ui: &mut egui::Ui) {
        let Some(dataset) = self.session.dataset() else {
            ui.label(egui::RichText::new("No file loaded").weak());
            return;
        };
        let summary = dataset.summary();
        Self::stat_row(ui, "Rows", &format_number(summary.rows));
        Self::stat_row(ui, "Columns", &format_number(summary.headers.len()));
        if let (Some(lo), Some(hi)) = (summary.x_min, summary.x_max) {
            Self::stat_row(ui, "X range", &format!("{lo} – {hi}"));
        }
        Self::stat_row(
            ui,
            "Marked rows",
            &format_number(self.session.index().marked_count()),
        );
    }

    fn render_view_options(&mut self, ui: &mut egui::Ui) {
        ui.label(form_label("Graph"));
        egui::ComboBox::from_id_salt("graph_kind")
            .selected_text(self.ui_state.graph_kind.label())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for kind in GraphKind::ALL {
                    ui.selectable_value(&mut self.ui_state.graph_kind, kind, kind.label());
                }
            });

        ui.add_space(4.0);
        ui.checkbox(&mut self.ui_state.selection_mode, "Select span by dragging")
            .on_hover_text("Off: dragging pans the chart");
        ui.checkbox(&mut self.ui_state.show_table, "Show data table");
    }

    fn render_marks_list(&mut self, ui: &mut egui::Ui, colors: ThemeColors) {
        let add = primary_button("Add mark").min_size(egui::vec2(ui.available_width(), 0.0));
        if ui
            .add(add)
            .on_hover_text("Create a mark from the range selected on the chart")
            .clicked()
        {
            self.begin_add_mark();
        }
        ui.add_space(6.0);

        if self.session.marks().is_empty() {
            ui.label(egui::RichText::new("No marks").color(colors.text_muted));
            return;
        }

        let mut edit = None;
        let mut delete = None;
        for (i, mark) in self.session.marks().iter().enumerate() {
            let selected = self.ui_state.selected_mark == Some(i);
            ui.horizontal(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(rect, Rounding::same(2.0), to_color32(mark.color()));

                let text = mark.to_string();
                if ui.selectable_label(selected, text).clicked() {
                    self.ui_state.selected_mark = Some(i);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let remove = egui::Button::new(egui::RichText::new("✕").color(accent::RED))
                        .fill(Color32::TRANSPARENT);
                    if ui.add(remove).on_hover_text("Delete mark").clicked() {
                        delete = Some(i);
                    }
                    if ui.small_button("Edit").clicked() {
                        edit = Some(i);
                    }
                });
            });
        }

        if let Some(i) = edit {
            self.begin_edit_mark(i);
        }
        if let Some(i) = delete {
            self.delete_mark(i);
        }

        ui.add_space(6.0);
        if ui.button("Clear all").clicked() {
            self.session.clear_marks();
            self.ui_state.selected_mark = None;
            self.sync_views();
            self.status_text = "Cleared marks".to_string();
        }
    }
}
