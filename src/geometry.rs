//! Real-valued sizes.
//!
//! [`Size`] is the unit every sizing decision in the crate is expressed in.
//! Widths and heights are `f64` so planning arithmetic matches the rounding
//! rules exactly; conversion to integer pixel dimensions happens only at the
//! edge, right before resampling.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A `(width, height)` pair of real numbers.
///
/// A size is *degenerate* when either axis is not strictly positive (this
/// includes NaN). Degenerate sizes are rejected everywhere they appear.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// The empty size.
    pub const ZERO: Size = Size::new(0.0, 0.0);

    /// Create a size from its two axes.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a size from integer pixel dimensions.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }

    /// Returns `true` if either axis is `<= 0` or NaN.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Returns `true` if both axes span at least one whole pixel.
    pub fn holds_a_pixel(&self) -> bool {
        self.width >= 1.0 && self.height >= 1.0
    }

    /// The larger width and the larger height, each taken independently.
    pub fn component_max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Cap each axis at `cap`, leaving smaller axes untouched.
    pub fn clamp_to(self, cap: f64) -> Size {
        Size::new(self.width.min(cap), self.height.min(cap))
    }

    /// The same size with its axes swapped.
    pub fn transposed(self) -> Size {
        Size::new(self.height, self.width)
    }

    /// Round to integer pixel dimensions.
    ///
    /// Returns `None` if the size is degenerate, rounds to zero in either
    /// axis, or does not fit in `u32`.
    pub fn to_pixels(self) -> Option<(u32, u32)> {
        if self.is_degenerate() {
            return None;
        }
        let width = self.width.round();
        let height = self.height.round();
        let limit = f64::from(u32::MAX);
        if width < 1.0 || height < 1.0 || width > limit || height > limit {
            return None;
        }
        Some((width as u32, height as u32))
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}×{}", self.width, self.height)
    }
}
