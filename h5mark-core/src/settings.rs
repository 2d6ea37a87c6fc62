//! Export and display settings.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default CSV field delimiter.
pub const DEFAULT_DELIMITER: char = ';';
/// Default number of decimal places for display and export.
pub const DEFAULT_PRECISION: usize = 4;
/// Largest accepted precision.
pub const MAX_PRECISION: usize = 17;

/// Delimiter and numeric precision applied to rounding and CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    delimiter: char,
    precision: usize,
}

/// Which settings changed in an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsChange {
    pub delimiter: bool,
    pub precision: bool,
}

impl SettingsChange {
    pub fn any(self) -> bool {
        self.delimiter || self.precision
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Settings {
    /// Creates validated settings.
    ///
    /// # Errors
    /// Returns [`Error::ConfigParse`] for an unusable delimiter or a
    /// precision above [`MAX_PRECISION`].
    pub fn new(delimiter: char, precision: usize) -> Result<Self> {
        let mut settings = Self::default();
        settings.set_delimiter(delimiter)?;
        settings.set_precision(precision)?;
        Ok(settings)
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Delimiter as a single byte (always ASCII).
    #[allow(clippy::cast_possible_truncation)]
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// # Errors
    /// Returns [`Error::ConfigParse`] unless `delimiter` is tab, space or a
    /// printable ASCII character other than `"`. Non-ASCII characters get
    /// their own message since CSV delimiters are single bytes.
    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        if !delimiter.is_ascii() {
            return Err(Error::ConfigParse {
                field: "delimiter",
                reason: format!(
                    "{delimiter:?} is not ASCII; only single-byte ASCII delimiters are supported"
                ),
            });
        }
        let usable =
            matches!(delimiter, '\t' | ' ') || (delimiter.is_ascii_graphic() && delimiter != '"');
        if !usable {
            return Err(Error::ConfigParse {
                field: "delimiter",
                reason: format!("{delimiter:?} cannot separate CSV fields"),
            });
        }
        self.delimiter = delimiter;
        Ok(())
    }

    /// # Errors
    /// Returns [`Error::ConfigParse`] above [`MAX_PRECISION`].
    pub fn set_precision(&mut self, precision: usize) -> Result<()> {
        if precision > MAX_PRECISION {
            return Err(Error::ConfigParse {
                field: "precision",
                reason: format!("{precision} exceeds the maximum of {MAX_PRECISION}"),
            });
        }
        self.precision = precision;
        Ok(())
    }

    /// Applies text entered in the settings dialog.
    ///
    /// Empty fields leave their setting unchanged. Both fields are validated
    /// before either is applied, so an invalid entry changes nothing.
    ///
    /// # Errors
    /// Returns [`Error::ConfigParse`] for the first invalid field.
    pub fn apply_input(&mut self, delimiter: &str, precision: &str) -> Result<SettingsChange> {
        let mut next = *self;
        if !delimiter.is_empty() {
            next.set_delimiter(parse_delimiter(delimiter)?)?;
        }
        if !precision.trim().is_empty() {
            next.set_precision(parse_precision(precision)?)?;
        }

        let change = SettingsChange {
            delimiter: next.delimiter != self.delimiter,
            precision: next.precision != self.precision,
        };
        *self = next;
        Ok(change)
    }
}

/// Parses a delimiter field; `\t` is accepted as an escape for tab.
///
/// # Errors
/// Returns [`Error::ConfigParse`] unless the input is exactly one character.
pub fn parse_delimiter(input: &str) -> Result<char> {
    if input == "\\t" {
        return Ok('\t');
    }
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::ConfigParse {
            field: "delimiter",
            reason: format!("'{input}' is not a single character"),
        }),
    }
}

/// Parses a precision field. Decimal input such as `3.0` is truncated.
///
/// # Errors
/// Returns [`Error::ConfigParse`] for non-numeric or negative input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_precision(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    if let Ok(value) = trimmed.parse::<usize>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value.trunc() as usize),
        _ => Err(Error::ConfigParse {
            field: "precision",
            reason: format!("'{trimmed}' is not a non-negative number"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.delimiter(), ';');
        assert_eq!(settings.delimiter_byte(), b';');
        assert_eq!(settings.precision(), 4);
    }

    #[test]
    fn test_parse_precision() {
        assert_eq!(parse_precision("3").unwrap(), 3);
        assert_eq!(parse_precision(" 3.0 ").unwrap(), 3);
        assert_eq!(parse_precision("2.9").unwrap(), 2);
        assert!(parse_precision("abc").is_err());
        assert!(parse_precision("-1").is_err());
        assert!(parse_precision("NaN").is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_invalid_precision_keeps_previous_value() {
        let mut settings = Settings::default();
        let err = settings.apply_input(",", "four").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { field: "precision", .. }));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_apply_input_reports_changes() {
        let mut settings = Settings::default();
        let change = settings.apply_input(",", "2").unwrap();
        assert_eq!(
            change,
            SettingsChange {
                delimiter: true,
                precision: true
            }
        );
        assert_eq!(settings.delimiter(), ',');
        assert_eq!(settings.precision(), 2);

        let change = settings.apply_input("", "").unwrap();
        assert!(!change.any());
        assert_eq!(settings.precision(), 2);
    }

    #[test]
    fn test_rejects_unusable_values() {
        let mut settings = Settings::default();
        assert!(settings.set_delimiter('"').is_err());
        assert!(settings.set_delimiter('\n').is_err());
        assert!(settings.set_delimiter('é').is_err());
        assert!(settings.set_precision(MAX_PRECISION + 1).is_err());
        assert_eq!(settings, Settings::default());
        assert!(Settings::new('\t', 0).is_ok());
    }

    #[test]
    fn test_non_ascii_delimiter_names_the_limit() {
        let mut settings = Settings::default();
        match settings.set_delimiter('§') {
            Err(Error::ConfigParse { field, reason }) => {
                assert_eq!(field, "delimiter");
                assert!(reason.contains("single-byte ASCII"));
            }
            other => panic!("expected ConfigParse, got {other:?}"),
        }
        match settings.set_delimiter('\n') {
            Err(Error::ConfigParse { reason, .. }) => assert!(!reason.contains("ASCII")),
            other => panic!("expected ConfigParse, got {other:?}"),
        }
        assert_eq!(settings.delimiter(), ';');
    }
}
