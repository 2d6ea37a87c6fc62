//! Colors, fonts and widget visuals.
//!
//! One palette per system theme; the style is rebuilt whenever egui reports
//! a dark/light switch.

use eframe::egui::{self, Color32, FontFamily, FontId, Id, Rounding, Stroke, TextStyle, Visuals};

/// Colors shared by both themes.
pub mod accent {
    use eframe::egui::Color32;

    pub const BLUE: Color32 = Color32::from_rgb(0x4a, 0x9e, 0xff);
    pub const GREEN: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
    pub const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
}

/// Panel, border and text colors for the active theme.
#[derive(Clone, Copy)]
pub struct ThemeColors {
    pub bg_window: Color32,
    pub bg_panel: Color32,
    pub bg_header: Color32,
    pub bg_input: Color32,
    pub border: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_dim: Color32,
    pub hover: Color32,
}

const fn gray(level: u8) -> Color32 {
    Color32::from_rgb(level, level, level)
}

impl ThemeColors {
    const DARK: Self = Self {
        bg_window: gray(0x1a),
        bg_panel: gray(0x1f),
        bg_header: gray(0x25),
        bg_input: gray(0x2a),
        border: gray(0x3c),
        text_primary: gray(0xe0),
        text_muted: gray(0x88),
        text_dim: gray(0x66),
        hover: gray(0x3a),
    };

    const LIGHT: Self = Self {
        bg_window: gray(0xf5),
        bg_panel: gray(0xff),
        bg_header: gray(0xfa),
        bg_input: gray(0xf0),
        border: gray(0xc8),
        text_primary: gray(0x1a),
        text_muted: gray(0x66),
        text_dim: gray(0x88),
        hover: gray(0xdd),
    };

    pub fn from_ctx(ctx: &egui::Context) -> Self {
        Self::for_mode(ctx.style().visuals.dark_mode)
    }

    pub fn from_ui(ui: &egui::Ui) -> Self {
        Self::for_mode(ui.visuals().dark_mode)
    }

    fn for_mode(dark: bool) -> Self {
        if dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    fn visuals(&self, dark: bool) -> Visuals {
        let mut visuals = if dark { Visuals::dark() } else { Visuals::light() };
        visuals.window_fill = self.bg_panel;
        visuals.panel_fill = self.bg_panel;
        visuals.faint_bg_color = self.bg_window;
        visuals.extreme_bg_color = self.bg_input;

        let rounding = Rounding::same(4.0);
        let widgets = &mut visuals.widgets;
        for (state, fill, text, outline) in [
            (&mut widgets.noninteractive, self.bg_input, self.text_muted, self.border),
            (&mut widgets.inactive, self.bg_input, self.text_primary, self.border),
            (&mut widgets.hovered, self.hover, self.text_primary, accent::BLUE),
            (&mut widgets.active, accent::BLUE, Color32::WHITE, accent::BLUE),
            (&mut widgets.open, self.bg_input, self.text_primary, self.border),
        ] {
            state.bg_fill = fill;
            state.weak_bg_fill = fill;
            state.fg_stroke = Stroke::new(1.0, text);
            state.bg_stroke = Stroke::new(1.0, outline);
            state.rounding = rounding;
        }

        let tint = if dark { 0.3 } else { 0.2 };
        visuals.selection.bg_fill = accent::BLUE.gamma_multiply(tint);
        visuals.selection.stroke = Stroke::new(1.0, accent::BLUE);
        visuals
    }
}

/// Apply visuals, fonts and spacing for the current dark/light mode.
pub fn configure_style(ctx: &egui::Context) {
    let dark = ctx.style().visuals.dark_mode;
    ctx.set_visuals(ThemeColors::for_mode(dark).visuals(dark));

    let mut style = (*ctx.style()).clone();
    let mono = |size| FontId::new(size, FontFamily::Monospace);
    style.text_styles = [
        (TextStyle::Small, mono(10.0)),
        (TextStyle::Body, mono(12.0)),
        (TextStyle::Button, mono(12.0)),
        (TextStyle::Heading, mono(14.0)),
        (TextStyle::Monospace, mono(12.0)),
    ]
    .into();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    ctx.set_style(style);
}

/// Re-style when the system switches between dark and light.
///
/// The last styled mode lives in egui's temporary memory.
pub fn apply_system_theme(ctx: &egui::Context) {
    let id = Id::new("h5mark_styled_dark_mode");
    let dark = ctx.style().visuals.dark_mode;
    let styled = ctx.data(|data| data.get_temp::<bool>(id));
    if styled != Some(dark) {
        configure_style(ctx);
        ctx.data_mut(|data| data.insert_temp(id, dark));
    }
}

pub fn primary_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(Color32::WHITE))
        .fill(accent::GREEN)
        .rounding(Rounding::same(4.0))
}

/// Upper-case heading above a side panel section.
pub fn section_header(text: &str) -> egui::RichText {
    egui::RichText::new(text.to_uppercase()).size(11.0).strong()
}

pub fn form_label(text: &str) -> egui::RichText {
    egui::RichText::new(text.to_uppercase()).size(10.0)
}

pub fn stat_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0).weak()
}

pub fn stat_value(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_mode() {
        assert_eq!(ThemeColors::for_mode(true).bg_panel, gray(0x1f));
        assert_eq!(ThemeColors::for_mode(false).text_primary, gray(0x1a));
    }

    #[test]
    fn test_visuals_keep_mode() {
        assert!(ThemeColors::DARK.visuals(true).dark_mode);
        assert!(!ThemeColors::LIGHT.visuals(false).dark_mode);
        let visuals = ThemeColors::LIGHT.visuals(false);
        assert_eq!(visuals.widgets.active.bg_fill, accent::BLUE);
        assert_eq!(visuals.panel_fill, gray(0xff));
    }

    #[test]
    fn test_system_theme_is_applied_once_per_mode() {
        let ctx = egui::Context::default();
        apply_system_theme(&ctx);
        assert_eq!(ctx.style().visuals.panel_fill, ThemeColors::DARK.bg_panel);

        ctx.set_visuals(Visuals::light());
        apply_system_theme(&ctx);
        assert_eq!(ctx.style().visuals.panel_fill, ThemeColors::LIGHT.bg_panel);
    }
}
