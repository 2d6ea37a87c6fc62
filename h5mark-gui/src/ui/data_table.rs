//! Data table (bottom panel) rendering.
//!
//! Rows inside a mark are filled with the mark color at the fixed overlay
//! alpha; the last column shows that mark's color.

use eframe::egui::{self, Color32};
use egui_extras::{Column, TableBuilder, TableRow};

use super::theme::{stat_label, ThemeColors};
use crate::app::H5MarkApp;
use crate::util::{format_number, mark_fill_color};

const ROW_HEIGHT: f32 = 18.0;

fn table_cell(row: &mut TableRow<'_, '_>, fill: Option<Color32>, text: String) {
    row.col(|ui| {
        if let Some(fill) = fill {
            ui.painter().rect_filled(ui.max_rect(), 0.0, fill);
        }
        ui.label(text);
    });
}

impl H5MarkApp {
    pub(crate) fn render_data_table(&self, ctx: &egui::Context) {
        if !self.ui_state.show_table {
            return;
        }
        let Some(dataset) = self.session.dataset() else {
            return;
        };
        let colors = ThemeColors::from_ctx(ctx);
        let precision = self.session.settings().precision();

        egui::TopBottomPanel::bottom("data_table")
            .resizable(true)
            .default_height(220.0)
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_panel)
                    .inner_margin(egui::Margin::symmetric(12.0, 8.0)),
            )
            .show(ctx, |ui| {
                ui.label(stat_label(&format!(
                    "{} rows, {} marked",
                    format_number(dataset.n_rows()),
                    format_number(self.session.index().marked_count())
                )));

                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::auto().at_least(48.0))
                    .columns(Column::auto().at_least(90.0), dataset.n_cols())
                    .column(Column::remainder().at_least(90.0))
                    .header(ROW_HEIGHT + 2.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("#");
                        });
                        for name in dataset.headers() {
                            header.col(|ui| {
                                ui.strong(name);
                            });
                        }
                        header.col(|ui| {
                            ui.strong(h5mark_io::MARK_COLUMN);
                        });
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, dataset.n_rows(), |mut row| {
                            let index = row.index();
                            let mark = self.session.row_mark(index);
                            let fill = mark.map(|m| mark_fill_color(m.color()));

                            table_cell(&mut row, fill, (index + 1).to_string());
                            for value in dataset.row(index).unwrap_or_default() {
                                table_cell(&mut row, fill, format!("{value:.precision$}"));
                            }
                            let color = mark.map(|m| m.color().hex()).unwrap_or_default();
                            table_cell(&mut row, fill, color);
                        });
                    });
            });
    }
}
