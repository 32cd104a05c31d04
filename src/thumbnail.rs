//! The thumbnail value returned by both pipelines.

use image::DynamicImage;

use crate::geometry::Size;

/// A decoded, downscaled raster.
///
/// Owned by the caller; nothing is cached or written to disk by the crate.
///
/// # Example
///
/// ```no_run
/// use mediathumb::{ImageThumbnailer, ThumbnailError};
///
/// let thumbnail = ImageThumbnailer::new().thumbnail("photo.jpg", 320.0)?;
/// println!("{}×{}", thumbnail.width(), thumbnail.height());
/// # Ok::<(), ThumbnailError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Thumbnail {
    image: DynamicImage,
    source_size: Size,
}

impl Thumbnail {
    pub(crate) fn new(image: DynamicImage, source_size: Size) -> Self {
        Self { image, source_size }
    }

    /// The thumbnail raster.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Take ownership of the raster.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel size of the raster.
    pub fn size(&self) -> Size {
        Size::from_pixels(self.width(), self.height())
    }

    /// Size of the source: the decoded image for images, the largest track
    /// size for videos.
    pub fn source_size(&self) -> Size {
        self.source_size
    }
}
