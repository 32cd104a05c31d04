//! Static image thumbnails.
//!
//! [`ImageThumbnailer`] runs the image pipeline: existence check, structural
//! probe, full decode, size check, longer-side planning, and a fast resize.
//! Each stage either advances or ends the call with the first unmet
//! precondition; there is no partial result and no retry.
//!
//! # Example
//!
//! ```no_run
//! use mediathumb::{ImageThumbnailer, ThumbnailError};
//!
//! let thumbnailer = ImageThumbnailer::new();
//! let thumbnail = thumbnailer.thumbnail("photo.jpg", 500.0)?;
//! thumbnail.image().save("photo_thumb.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

use crate::backend::{ImageCodec, ImageCrateCodec};
use crate::config::ThumbnailOptions;
use crate::error::ThumbnailError;
use crate::geometry::Size;
use crate::planner;
use crate::thumbnail::Thumbnail;
use crate::validation;

/// Produces thumbnails of still images.
///
/// Generic over the [`ImageCodec`] so decoding and resampling can be swapped
/// out; [`ImageThumbnailer::new`] uses [`ImageCrateCodec`].
#[derive(Debug, Clone, Default)]
pub struct ImageThumbnailer<C = ImageCrateCodec> {
    codec: C,
    options: ThumbnailOptions,
}

impl ImageThumbnailer<ImageCrateCodec> {
    /// Create a thumbnailer backed by the `image` crate.
    pub fn new() -> Self {
        Self::with_codec(ImageCrateCodec)
    }
}

impl<C: ImageCodec> ImageThumbnailer<C> {
    /// Create a thumbnailer with a custom codec.
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            options: ThumbnailOptions::default(),
        }
    }

    /// Replace the thumbnail options.
    #[must_use]
    pub fn with_options(mut self, options: ThumbnailOptions) -> Self {
        self.options = options;
        self
    }

    /// The active options.
    pub fn options(&self) -> &ThumbnailOptions {
        &self.options
    }

    /// Thumbnail the image at `path`, fixing its longer side to
    /// `max_dimension` pixels.
    ///
    /// A 2000×1000 image with `max_dimension = 500` yields 500×250; a square
    /// image is treated as portrait.
    ///
    /// # Errors
    ///
    /// - [`ThumbnailError::FileMissing`] if `path` is not an existing file.
    /// - [`ThumbnailError::InvalidImage`] if the structural probe fails or
    ///   the decoded image has a degenerate size.
    /// - [`ThumbnailError::DecodeFailure`] if full decoding yields nothing.
    /// - [`ThumbnailError::Dimension`] if the plan is degenerate or not
    ///   strictly smaller than the original.
    /// - [`ThumbnailError::ResizeFailure`] if resampling yields nothing.
    pub fn thumbnail<P: AsRef<Path>>(
        &self,
        path: P,
        max_dimension: f64,
    ) -> Result<Thumbnail, ThumbnailError> {
        let path = path.as_ref();
        log::debug!(
            "Generating image thumbnail for {} (max_dim={max_dimension})",
            path.display()
        );

        if !self.codec.file_exists(path) {
            return Err(ThumbnailError::FileMissing {
                path: path.to_path_buf(),
            });
        }

        if !self.codec.probe(path) {
            return Err(ThumbnailError::InvalidImage(format!(
                "{} is not a recognised image",
                path.display()
            )));
        }

        let original = self.codec.decode(path).ok_or_else(|| {
            ThumbnailError::DecodeFailure(format!(
                "could not load original image {}",
                path.display()
            ))
        })?;

        let original_size = Size::from_pixels(original.width(), original.height());
        if !validation::validate_image(original_size) {
            return Err(ThumbnailError::InvalidImage(format!(
                "original image has invalid size {original_size}"
            )));
        }

        let target = planner::compute_thumbnail_size(original_size, max_dimension)?;

        // A fractional bound can round up to the original's pixel size.
        let (width, height) = target
            .to_pixels()
            .filter(|&(width, height)| width < original.width() && height < original.height())
            .ok_or_else(|| {
                ThumbnailError::Dimension(format!(
                    "thumbnail {target} isn't smaller than the original {original_size} in whole pixels"
                ))
            })?;

        let resized = self
            .codec
            .resize(&original, width, height, self.options.resize_filter)
            .ok_or_else(|| {
                ThumbnailError::ResizeFailure(format!(
                    "could not scale {original_size} image to {width}×{height}"
                ))
            })?;

        Ok(Thumbnail::new(resized, original_size))
    }
}
