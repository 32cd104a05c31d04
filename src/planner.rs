//! Thumbnail size planning.
//!
//! Two policies are provided:
//!
//! - [`compute_thumbnail_size`]: the *longer-side* policy used for images.
//!   The longer original axis becomes exactly `max_dimension` and the other
//!   axis follows proportionally. The plan must be strictly smaller than the
//!   original in both axes.
//! - [`fit_within`]: the *fit-within* policy used for video stills. The
//!   picture shrinks until it fits inside a bounding box, touching at most
//!   one side, and is never enlarged.
//!
//! # Example
//!
//! ```
//! use mediathumb::{Size, planner};
//!
//! let plan = planner::compute_thumbnail_size(Size::new(2000.0, 1000.0), 500.0)?;
//! assert_eq!(plan, Size::new(500.0, 250.0));
//! # Ok::<(), mediathumb::ThumbnailError>(())
//! ```

use crate::error::ThumbnailError;
use crate::geometry::Size;

/// Compute the thumbnail size of an image under the longer-side policy.
///
/// Landscape originals (`width > height`) fix the width; portrait and square
/// originals fix the height. The derived axis is rounded half away from zero.
///
/// # Errors
///
/// Returns [`ThumbnailError::Dimension`] if `original` is degenerate, if the
/// planned size is degenerate, or if the plan is not strictly smaller than
/// `original` in both axes (which includes originals already within the
/// bound).
pub fn compute_thumbnail_size(original: Size, max_dimension: f64) -> Result<Size, ThumbnailError> {
    if original.is_degenerate() {
        return Err(ThumbnailError::Dimension(format!(
            "original image has invalid size {original}"
        )));
    }

    let target = if original.width > original.height {
        Size::new(
            max_dimension,
            (max_dimension * original.height / original.width).round(),
        )
    } else {
        Size::new(
            (max_dimension * original.width / original.height).round(),
            max_dimension,
        )
    };

    if target.is_degenerate() {
        return Err(ThumbnailError::Dimension(format!(
            "thumbnail has invalid size {target}"
        )));
    }

    if !(original.width > target.width && original.height > target.height) {
        return Err(ThumbnailError::Dimension(format!(
            "thumbnail {target} isn't smaller than the original {original}"
        )));
    }

    Ok(target)
}

/// Compute the size of a picture shrunk to fit inside `bound`.
///
/// Aspect ratio is preserved up to rounding. Pictures already inside the
/// bound keep their size. Each axis is at least one pixel and at most the
/// bound's whole-pixel extent.
///
/// # Errors
///
/// Returns [`ThumbnailError::Dimension`] if `original` is degenerate or
/// `bound` is narrower or shorter than one pixel.
pub fn fit_within(original: Size, bound: Size) -> Result<Size, ThumbnailError> {
    if original.is_degenerate() {
        return Err(ThumbnailError::Dimension(format!(
            "source frame has invalid size {original}"
        )));
    }
    if !bound.holds_a_pixel() {
        return Err(ThumbnailError::Dimension(format!(
            "bounding size {bound} is invalid"
        )));
    }

    let scale = (bound.width / original.width)
        .min(bound.height / original.height)
        .min(1.0);
    let width = (original.width * scale)
        .round()
        .min(bound.width.floor())
        .max(1.0);
    let height = (original.height * scale)
        .round()
        .min(bound.height.floor())
        .max(1.0);

    Ok(Size::new(width, height))
}
