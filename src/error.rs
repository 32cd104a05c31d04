//! Error types for the `mediathumb` crate.
//!
//! This module defines [`ThumbnailError`], the single error type returned by
//! both thumbnail pipelines. Every variant is terminal: the pipelines never
//! retry, and the first unmet precondition ends the call. Each variant carries
//! a human-readable description so callers can surface it or fall back to a
//! placeholder without extra logging.

use std::path::PathBuf;

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// The unified error type for all thumbnail operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThumbnailError {
    /// The source path does not resolve to an existing file.
    #[error("Media file missing: {}", path.display())]
    FileMissing {
        /// Path that was passed to the thumbnailer.
        path: PathBuf,
    },

    /// The bytes are not a recognised image, or the decoded image has a
    /// degenerate size.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The container could not be opened as video, has no usable video
    /// track, or a track exceeds the supported dimension cap.
    #[error("Invalid video: {0}")]
    InvalidVideo(String),

    /// The original or planned thumbnail size is unusable.
    #[error("Invalid thumbnail dimensions: {0}")]
    Dimension(String),

    /// Full decode or frame extraction produced no data.
    #[error("Failed to decode media: {0}")]
    DecodeFailure(String),

    /// The resampling step produced no output.
    #[error("Failed to resize image: {0}")]
    ResizeFailure(String),

    /// The blocking task running an async request panicked or was aborted.
    #[cfg(feature = "async")]
    #[error("Thumbnail task failed: {0}")]
    TaskFailed(String),
}

/// Fieldless discriminant of a [`ThumbnailError`].
///
/// Handy for matching in callers and tests without destructuring messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileMissing,
    InvalidImage,
    InvalidVideo,
    Dimension,
    DecodeFailure,
    ResizeFailure,
    #[cfg(feature = "async")]
    TaskFailed,
}

impl ThumbnailError {
    /// The kind of failure, without its description.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ThumbnailError::FileMissing { .. } => ErrorKind::FileMissing,
            ThumbnailError::InvalidImage(_) => ErrorKind::InvalidImage,
            ThumbnailError::InvalidVideo(_) => ErrorKind::InvalidVideo,
            ThumbnailError::Dimension(_) => ErrorKind::Dimension,
            ThumbnailError::DecodeFailure(_) => ErrorKind::DecodeFailure,
            ThumbnailError::ResizeFailure(_) => ErrorKind::ResizeFailure,
            #[cfg(feature = "async")]
            ThumbnailError::TaskFailed(_) => ErrorKind::TaskFailed,
        }
    }
}

// FFmpeg errors only surface once a container has been accepted, so they are
// decode failures by default. Open-time errors are mapped explicitly.
impl From<FfmpegError> for ThumbnailError {
    fn from(error: FfmpegError) -> Self {
        ThumbnailError::DecodeFailure(format!("FFmpeg error: {error}"))
    }
}
