//! Decoder and resampler collaborators.
//!
//! The thumbnail pipelines never touch files, codecs, or pixels directly.
//! They talk to these traits instead, which keeps the sizing and validation
//! logic independent of any particular decoder and lets tests substitute
//! in-memory fakes.
//!
//! Default implementations:
//!
//! - [`ImageCrateCodec`]: images through the [`image`] crate.
//! - [`FfmpegVideoSource`]: video through FFmpeg via `ffmpeg-next`.

mod ffmpeg;
mod image_codec;

use std::path::Path;
use std::time::Duration;

use image::DynamicImage;

use crate::config::ResizeFilter;
use crate::error::ThumbnailError;
use crate::geometry::Size;
use crate::metadata::VideoTrack;

pub use self::ffmpeg::{FfmpegVideoAsset, FfmpegVideoSource};
pub use self::image_codec::ImageCrateCodec;

/// Image decoding and resampling.
///
/// Implementations must be shareable across threads; each call owns the
/// values it produces.
pub trait ImageCodec: Send + Sync {
    /// Returns `true` if `path` resolves to an existing file.
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Cheap structural check that the file is plausibly a valid image.
    ///
    /// Should look at the format signature and header only, without
    /// decoding pixel data.
    fn probe(&self, path: &Path) -> bool;

    /// Fully decode the image at `path`.
    fn decode(&self, path: &Path) -> Option<DynamicImage>;

    /// Resample `image` to exactly `width` × `height` pixels.
    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        filter: ResizeFilter,
    ) -> Option<DynamicImage>;
}

/// Opens video containers.
pub trait VideoSource: Send + Sync {
    /// Returns `true` if `path` resolves to an existing file.
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Open `path` as a video asset.
    ///
    /// # Errors
    ///
    /// Implementations return [`ThumbnailError::InvalidVideo`] when the file
    /// cannot be opened as a media container.
    fn open(&self, path: &Path) -> Result<Box<dyn VideoAsset>, ThumbnailError>;
}

/// An opened video container.
pub trait VideoAsset {
    /// All video tracks, in container order.
    fn video_tracks(&self) -> &[VideoTrack];

    /// Container duration, if known.
    fn duration(&self) -> Option<Duration>;

    /// Produce a single still frame.
    ///
    /// The frame must fit within `request.max_size` with its aspect ratio
    /// preserved, and must have the track orientation applied when
    /// `request.apply_track_transform` is set. Returns `None` if no frame can
    /// be produced.
    fn extract_frame(&mut self, request: &FrameRequest) -> Option<DynamicImage>;
}

/// Parameters for [`VideoAsset::extract_frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRequest {
    /// Presentation time of the wanted frame.
    pub at: Duration,
    /// Bounding box the frame must fit within.
    pub max_size: Size,
    /// Whether to turn the frame upright using the track's rotation.
    pub apply_track_transform: bool,
}
