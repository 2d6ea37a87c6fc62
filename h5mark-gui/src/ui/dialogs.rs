//! Modal windows: mark create/edit, settings and notices.

use eframe::egui::{self, Align2, Color32};

use super::theme::{accent, form_label, primary_button};
use crate::app::H5MarkApp;
use crate::message::NoticeKind;

/// Button pressed in a confirm/cancel dialog this frame.
#[derive(Clone, Copy, PartialEq, Eq)]
enum DialogAction {
    None,
    Confirm,
    Cancel,
}

fn modal_window<'open>(title: &str) -> egui::Window<'open> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
}

fn error_line(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(error) = error {
        ui.colored_label(accent::RED, error);
    }
}

fn confirm_buttons(ui: &mut egui::Ui, confirm: &str) -> DialogAction {
    let mut action = DialogAction::None;
    ui.horizontal(|ui| {
        if ui.add(primary_button(confirm)).clicked() {
            action = DialogAction::Confirm;
        }
        if ui.button("Cancel").clicked() {
            action = DialogAction::Cancel;
        }
    });
    action
}

impl H5MarkApp {
    /// Render whichever dialog is open. Notices are drawn last, on top.
    pub(crate) fn render_dialogs(&mut self, ctx: &egui::Context) {
        self.render_mark_dialog(ctx);
        self.render_settings_dialog(ctx);
        self.render_notice(ctx);
    }

    fn render_mark_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.mark_dialog.as_mut() else {
            return;
        };
        let mut open = true;
        let mut action = DialogAction::None;

        modal_window(dialog.title())
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("mark_fields")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(form_label("xmin"));
                        ui.text_edit_singleline(&mut dialog.xmin);
                        ui.end_row();

                        ui.label(form_label("xmax"));
                        ui.text_edit_singleline(&mut dialog.xmax);
                        ui.end_row();

                        ui.label(form_label("Color"));
                        ui.color_edit_button_srgba(&mut dialog.color);
                        ui.end_row();
                    });
                error_line(ui, dialog.error.as_deref());
                ui.add_space(8.0);
                action = confirm_buttons(ui, "OK");
            });

        if !open {
            action = DialogAction::Cancel;
        }
        match action {
            DialogAction::Confirm => self.confirm_mark_dialog(),
            DialogAction::Cancel => self.cancel_mark_dialog(),
            DialogAction::None => {}
        }
    }

    fn render_settings_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.settings_dialog.as_mut() else {
            return;
        };
        let mut open = true;
        let mut action = DialogAction::None;

        modal_window("Settings").open(&mut open).show(ctx, |ui| {
            egui::Grid::new("settings_fields")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(form_label("Delimiter"));
                    ui.add(egui::TextEdit::singleline(&mut dialog.delimiter).desired_width(60.0))
                        .on_hover_text("One character; \\t for tab. Leave empty to keep.");
                    ui.end_row();

                    ui.label(form_label("Precision"));
                    ui.add(egui::TextEdit::singleline(&mut dialog.precision).desired_width(60.0))
                        .on_hover_text("Decimal places for display, rounding and export");
                    ui.end_row();
                });
            error_line(ui, dialog.error.as_deref());
            ui.add_space(8.0);
            action = confirm_buttons(ui, "Apply");
        });

        if !open {
            action = DialogAction::Cancel;
        }
        match action {
            DialogAction::Confirm => self.confirm_settings_dialog(),
            DialogAction::Cancel => self.settings_dialog = None,
            DialogAction::None => {}
        }
    }

    fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let mut dismissed = false;
        let color = match notice.kind {
            NoticeKind::Info => accent::BLUE,
            NoticeKind::Error => accent::RED,
        };

        modal_window(&notice.title).show(ctx, |ui| {
            ui.set_min_width(240.0);
            ui.label(egui::RichText::new(&notice.text).color(color));
            ui.add_space(8.0);
            let ok = egui::Button::new(egui::RichText::new("OK").color(Color32::WHITE))
                .fill(color);
            if ui.add(ok).clicked() {
                dismissed = true;
            }
        });

        if dismissed {
            self.notice = None;
        }
    }
}
