//! Main view (central panel) rendering.

use eframe::egui::{self, Color32, PointerButton};
use egui_plot::{Legend, Plot, PlotResponse};

use super::theme::ThemeColors;
use crate::app::H5MarkApp;
use crate::viewer::{draw_series, draw_span, y_extent};

/// Fill of the span being dragged, before it becomes a mark.
const SELECTION_FILL: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);

impl H5MarkApp {
    /// Render the central panel with the chart.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(dataset) = self.session.dataset() else {
                let colors = ThemeColors::from_ui(ui);
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("No Data").color(colors.text_muted));
                });
                return;
            };

            let selecting = self.ui_state.selection_mode && !self.has_modal();
            let y_range = y_extent(dataset);
            let span = self.selection.span();
            let kind = self.ui_state.graph_kind;

            let response = Plot::new("chart")
                .legend(Legend::default())
                .show_grid(true)
                .x_axis_label(dataset.header(0).unwrap_or_default())
                .allow_drag(!selecting)
                .allow_boxed_zoom(!selecting)
                .show(ui, |plot_ui| {
                    draw_series(plot_ui, dataset, kind);
                    self.overlays.draw(plot_ui, y_range);
                    if let Some(bounds) = span {
                        draw_span(plot_ui, bounds, y_range, SELECTION_FILL, Color32::GRAY);
                    }
                });

            if selecting {
                self.handle_selection_drag(&response);
            }
        });
    }

    /// Feed primary-button drags on the chart into the span selection.
    fn handle_selection_drag(&mut self, plot: &PlotResponse<()>) {
        let response = &plot.response;
        let pointer_x = response
            .interact_pointer_pos()
            .map(|pos| plot.transform.value_from_position(pos).x);

        if response.drag_started_by(PointerButton::Primary) {
            if let Some(x) = pointer_x {
                self.selection.begin(x);
            }
        } else if response.dragged_by(PointerButton::Primary) {
            if let Some(x) = pointer_x {
                self.selection.update(x);
            }
        }

        if response.drag_stopped_by(PointerButton::Primary) {
            if let Some((xmin, xmax)) = self.selection.release() {
                self.status_text = format!("Selected {xmin:.4} – {xmax:.4}");
            }
        }
    }
}
