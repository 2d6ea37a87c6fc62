//! Color and number helpers for h5mark-gui.

use eframe::egui::Color32;
use h5mark_core::{Rgba, MARK_ALPHA};
use rand::Rng;

/// Convert a mark color to an egui color, keeping its alpha.
pub fn to_color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Convert an egui color back to a mark color.
pub fn from_color32(color: Color32) -> Rgba {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba::new(r, g, b, a)
}

/// Fill used for a mark's span and table rows.
///
/// Always drawn at [`MARK_ALPHA`], whatever alpha the mark stores.
pub fn mark_fill_color(color: Rgba) -> Color32 {
    to_color32(color.with_alpha_f(MARK_ALPHA))
}

/// Random opaque color for a new mark.
pub fn random_mark_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba {
    Rgba::rgb(rng.gen(), rng.gen(), rng.gen())
}

/// Format a number with comma separators for readability.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_number(12345678), "12,345,678");
/// assert_eq!(format_number(42), "42");
/// ```
#[must_use]
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
