//! Thumbnail configuration.
//!
//! Process-wide caps are plain constants. Per-thumbnailer settings live in
//! [`ThumbnailOptions`], a small builder threaded through both pipelines.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use mediathumb::{ImageThumbnailer, ResizeFilter, ThumbnailOptions};
//!
//! let options = ThumbnailOptions::new()
//!     .with_resize_filter(ResizeFilter::Nearest)
//!     .with_frame_offset(Duration::from_millis(100));
//! let thumbnailer = ImageThumbnailer::new().with_options(options);
//! ```

use std::time::Duration;

use image::imageops::FilterType;

/// Largest accepted video track width or height, in pixels.
pub const MAX_VIDEO_TRACK_DIMENSION: f64 = 3072.0;

/// Upper bound on either axis of a video thumbnail, in pixels.
///
/// Requested bounds are clamped to this before any validation.
pub const MAX_VIDEO_STILL_DIMENSION: f64 = 1024.0;

/// Default offset of the captured video frame: one sixtieth of a second.
///
/// Some encoders put black or transition frames at time zero.
pub const VIDEO_FRAME_OFFSET: Duration = Duration::from_nanos(16_666_667);

/// Resampling kernel used when shrinking images.
///
/// Only cheap kernels are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    /// Nearest-neighbour sampling. Fastest, visibly blocky.
    Nearest,
    /// Linear (tent) filter. This is the default.
    #[default]
    Triangle,
}

impl ResizeFilter {
    pub(crate) fn to_filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
        }
    }
}

/// Settings shared by [`ImageThumbnailer`](crate::ImageThumbnailer) and
/// [`VideoFrameExtractor`](crate::VideoFrameExtractor).
///
/// All fields have defaults that reproduce the standard behaviour: a
/// triangle resize and a frame captured at [`VIDEO_FRAME_OFFSET`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ThumbnailOptions {
    /// Kernel used for image resizing and for final video bounding.
    pub resize_filter: ResizeFilter,
    /// Time of the captured video frame.
    pub frame_offset: Duration,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            resize_filter: ResizeFilter::default(),
            frame_offset: VIDEO_FRAME_OFFSET,
        }
    }

    /// Set the resampling kernel.
    pub fn with_resize_filter(mut self, filter: ResizeFilter) -> Self {
        self.resize_filter = filter;
        self
    }

    /// Set the time at which video frames are captured.
    pub fn with_frame_offset(mut self, offset: Duration) -> Self {
        self.frame_offset = offset;
        self
    }
}
