//! Video still thumbnails.
//!
//! [`VideoFrameExtractor`] captures a single frame shortly after the start
//! of a video and returns it fitted within a bounding box. The box is capped
//! at [`MAX_VIDEO_STILL_DIMENSION`] per axis no matter what the caller asks
//! for, and tracks larger than [`MAX_VIDEO_TRACK_DIMENSION`] are rejected
//! outright.
//!
//! The frame is taken at [`VIDEO_FRAME_OFFSET`] (1/60 s) rather than at zero,
//! to skip the black or transition frames some encoders emit first. Videos
//! shorter than the offset are captured at zero instead.
//!
//! # Example
//!
//! ```no_run
//! use mediathumb::{Size, ThumbnailError, VideoFrameExtractor};
//!
//! let extractor = VideoFrameExtractor::new();
//!
//! // Default bound: 1024×1024.
//! let still = extractor.thumbnail("clip.mp4")?;
//!
//! // Custom bound, still capped at 1024 per axis.
//! let small = extractor.thumbnail_with_max_size("clip.mp4", Size::new(320.0, 240.0))?;
//! assert!(small.width() <= 320 && small.height() <= 240);
//! # Ok::<(), ThumbnailError>(())
//! ```
//!
//! [`MAX_VIDEO_TRACK_DIMENSION`]: crate::config::MAX_VIDEO_TRACK_DIMENSION
//! [`VIDEO_FRAME_OFFSET`]: crate::config::VIDEO_FRAME_OFFSET

use std::path::Path;
use std::time::Duration;

use image::DynamicImage;

use crate::backend::{FfmpegVideoSource, FrameRequest, VideoSource};
use crate::config::{MAX_VIDEO_STILL_DIMENSION, ThumbnailOptions};
use crate::error::ThumbnailError;
use crate::geometry::Size;
use crate::planner;
use crate::thumbnail::Thumbnail;
use crate::validation;

/// Produces still-frame thumbnails of videos.
///
/// Generic over the [`VideoSource`]; [`VideoFrameExtractor::new`] uses
/// [`FfmpegVideoSource`].
#[derive(Debug, Clone, Default)]
pub struct VideoFrameExtractor<S = FfmpegVideoSource> {
    source: S,
    options: ThumbnailOptions,
}

impl VideoFrameExtractor<FfmpegVideoSource> {
    /// Create an extractor backed by FFmpeg.
    pub fn new() -> Self {
        Self::with_source(FfmpegVideoSource)
    }
}

impl<S: VideoSource> VideoFrameExtractor<S> {
    /// Create an extractor with a custom video source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
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

    /// Thumbnail a video within the default 1024×1024 bound.
    ///
    /// # Errors
    ///
    /// Same as [`thumbnail_with_max_size`](VideoFrameExtractor::thumbnail_with_max_size).
    pub fn thumbnail<P: AsRef<Path>>(&self, path: P) -> Result<Thumbnail, ThumbnailError> {
        self.thumbnail_with_max_size(
            path,
            Size::new(MAX_VIDEO_STILL_DIMENSION, MAX_VIDEO_STILL_DIMENSION),
        )
    }

    /// Thumbnail a video within `max_size`.
    ///
    /// `max_size` is first clamped to 1024 per axis. The captured frame is
    /// turned upright using the track's orientation, then shrunk to fit the
    /// bound with its aspect ratio preserved. Frames already inside the
    /// bound are not enlarged.
    ///
    /// # Errors
    ///
    /// - [`ThumbnailError::FileMissing`] if `path` is not an existing file.
    /// - [`ThumbnailError::InvalidVideo`] if the file cannot be opened as
    ///   video, has no usable video track, or a track exceeds 3072 pixels.
    /// - [`ThumbnailError::Dimension`] if the clamped bound is under one
    ///   pixel in either axis.
    /// - [`ThumbnailError::DecodeFailure`] if no frame can be produced.
    /// - [`ThumbnailError::ResizeFailure`] if an oversized frame cannot be
    ///   brought within the bound.
    pub fn thumbnail_with_max_size<P: AsRef<Path>>(
        &self,
        path: P,
        max_size: Size,
    ) -> Result<Thumbnail, ThumbnailError> {
        let path = path.as_ref();
        let max_size = max_size.clamp_to(MAX_VIDEO_STILL_DIMENSION);
        log::debug!(
            "Generating video thumbnail for {} (max_size={max_size})",
            path.display()
        );

        if !self.source.file_exists(path) {
            return Err(ThumbnailError::FileMissing {
                path: path.to_path_buf(),
            });
        }

        let mut asset = self.source.open(path)?;
        let track_size = validation::check_video(asset.video_tracks())
            .map_err(|rejection| ThumbnailError::InvalidVideo(rejection.to_string()))?;

        if !max_size.holds_a_pixel() {
            return Err(ThumbnailError::Dimension(format!(
                "bounding size {max_size} is invalid"
            )));
        }

        let request = FrameRequest {
            at: capture_time(self.options.frame_offset, asset.duration()),
            max_size,
            apply_track_transform: true,
        };

        let frame = asset.extract_frame(&request).ok_or_else(|| {
            ThumbnailError::DecodeFailure(format!(
                "could not capture a frame at {:?} from {}",
                request.at,
                path.display()
            ))
        })?;

        let frame = self.bound_frame(frame, max_size)?;
        Ok(Thumbnail::new(frame, track_size))
    }

    /// Returns `true` if `path` exists and opens as a thumbnailable video.
    ///
    /// Never fails; the reason for a `false` is logged.
    pub fn is_valid_video<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        if !self.source.file_exists(path) {
            log::error!("Media file missing: {}", path.display());
            return false;
        }
        match self.source.open(path) {
            Ok(asset) => validation::validate_video(asset.video_tracks()),
            Err(error) => {
                log::error!("{error}");
                false
            }
        }
    }

    /// Shrink a frame that a source returned larger than the bound.
    fn bound_frame(
        &self,
        frame: DynamicImage,
        max_size: Size,
    ) -> Result<DynamicImage, ThumbnailError> {
        let frame_size = Size::from_pixels(frame.width(), frame.height());
        if frame_size.is_degenerate() {
            return Err(ThumbnailError::DecodeFailure(format!(
                "captured frame is empty ({frame_size})"
            )));
        }
        let fitted = planner::fit_within(frame_size, max_size)?;
        if fitted == frame_size {
            return Ok(frame);
        }

        log::debug!("Source returned {frame_size} frame for {max_size} bound; shrinking");
        let (width, height) = fitted.to_pixels().ok_or_else(|| {
            ThumbnailError::ResizeFailure(format!("cannot shrink {frame_size} frame to {fitted}"))
        })?;
        Ok(frame.resize_exact(width, height, self.options.resize_filter.to_filter_type()))
    }
}

/// The capture time for an asset of the given duration.
///
/// Assets known to be shorter than `offset` are captured at zero.
fn capture_time(offset: Duration, duration: Option<Duration>) -> Duration {
    match duration {
        Some(duration) if duration < offset => Duration::ZERO,
        _ => offset,
    }
}
