//! Mark value type.

use std::fmt;

use crate::{Error, Result, Rgba};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Opacity used for every span overlay, independent of the mark's own alpha.
pub const MARK_ALPHA: f32 = 0.5;

/// A colored, closed interval `[xmin, xmax]` on the dataset's X axis.
///
/// Bounds are private so that `xmin <= xmax` holds for every constructed
/// value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Mark {
    xmin: f64,
    xmax: f64,
    color: Rgba,
}

impl Mark {
    /// Creates a new mark.
    ///
    /// # Errors
    /// Returns [`Error::NonFiniteBound`] for NaN or infinite bounds and
    /// [`Error::InvalidBounds`] when `xmin > xmax`.
    pub fn new(xmin: f64, xmax: f64, color: Rgba) -> Result<Self> {
        for bound in [xmin, xmax] {
            if !bound.is_finite() {
                return Err(Error::NonFiniteBound(bound));
            }
        }
        if xmin > xmax {
            return Err(Error::InvalidBounds { xmin, xmax });
        }
        Ok(Self { xmin, xmax, color })
    }

    /// Lower bound (inclusive).
    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Upper bound (inclusive).
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Whether `x` lies inside the interval, both ends inclusive.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.xmin <= x && x <= self.xmax
    }

    /// Whether two marks properly intersect. Touching endpoints do not count.
    #[inline]
    pub fn overlaps(&self, other: &Mark) -> bool {
        !(self.xmax <= other.xmin || other.xmax <= self.xmin)
    }

    /// Returns the mark with a different color.
    #[must_use]
    pub fn with_color(self, color: Rgba) -> Self {
        Self { color, ..self }
    }

    /// Returns the mark with new bounds, re-validated.
    ///
    /// # Errors
    /// Same conditions as [`Mark::new`].
    pub fn with_bounds(self, xmin: f64, xmax: f64) -> Result<Self> {
        Self::new(xmin, xmax, self.color)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}  |  {:.2}", self.xmin, self.xmax)
    }
}
