//! RGBA colors for marks.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color.
///
/// The textual identifier (`Display`) is `#rrggbb`; alpha is carried for
/// rendering but never written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const RED: Self = Self::rgb(0xff, 0x00, 0x00);
    pub const GREEN: Self = Self::rgb(0x00, 0x80, 0x00);
    pub const BLUE: Self = Self::rgb(0x00, 0x00, 0xff);
    pub const YELLOW: Self = Self::rgb(0xff, 0xff, 0x00);
    pub const ORANGE: Self = Self::rgb(0xff, 0xa5, 0x00);
    pub const PURPLE: Self = Self::rgb(0x80, 0x00, 0x80);
    pub const CYAN: Self = Self::rgb(0x00, 0xff, 0xff);
    pub const MAGENTA: Self = Self::rgb(0xff, 0x00, 0xff);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const GRAY: Self = Self::rgb(0x80, 0x80, 0x80);

    /// Creates a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    /// Returns the same color with alpha set from a fraction in [0, 1].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_alpha_f(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Alpha as a fraction in [0, 1].
    pub fn alpha_f(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// `#rrggbb` identifier.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "yellow" => Self::YELLOW,
            "orange" => Self::ORANGE,
            "purple" => Self::PURPLE,
            "cyan" => Self::CYAN,
            "magenta" => Self::MAGENTA,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "gray" | "grey" => Self::GRAY,
            _ => return None,
        };
        Some(color)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::GRAY
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Rgba {
    type Err = Error;

    /// Parses `#rrggbb`, `rrggbb`, `#rrggbbaa` or a basic color name.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(color) = Self::named(&trimmed.to_ascii_lowercase()) {
            return Ok(color);
        }

        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || Error::ConfigParse {
            field: "color",
            reason: format!("'{s}' is not a color name or #rrggbb value"),
        };
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let r = channel(0)?;
        let g = channel(2)?;
        let b = channel(4)?;
        let a = if digits.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self::new(r, g, b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_identifier() {
        assert_eq!(Rgba::rgb(0xff, 0x10, 0x00).to_string(), "#ff1000");
        assert_eq!(Rgba::new(1, 2, 3, 4).hex(), "#010203");
    }

    #[test]
    fn test_parse_hex_and_names() {
        assert_eq!("#ff0000".parse::<Rgba>().unwrap(), Rgba::RED);
        assert_eq!("00ff00".parse::<Rgba>().unwrap(), Rgba::rgb(0, 0xff, 0));
        assert_eq!("Red".parse::<Rgba>().unwrap(), Rgba::RED);
        assert_eq!(
            "#11223380".parse::<Rgba>().unwrap(),
            Rgba::new(0x11, 0x22, 0x33, 0x80)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#12".parse::<Rgba>().is_err());
        assert!("zzzzzz".parse::<Rgba>().is_err());
        assert!("#ééé".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_alpha_fraction() {
        let c = Rgba::RED.with_alpha_f(0.5);
        assert_eq!(c.a, 128);
        assert!((c.alpha_f() - 0.502).abs() < 0.01);
        assert_eq!(Rgba::RED.with_alpha_f(2.0).a, 255);
    }
}
