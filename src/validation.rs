//! Media validation.
//!
//! Decides whether a decoded image or an opened video is well-formed enough
//! to thumbnail. The checks are pure: they read sizes, emit a diagnostic
//! through the `log` facade on rejection, and mutate nothing.
//!
//! The structural image probe (format signature and header) is a codec
//! concern and lives on [`ImageCodec::probe`](crate::backend::ImageCodec::probe).
//!
//! # Example
//!
//! ```
//! use mediathumb::{Size, VideoTrack, validation};
//!
//! let tracks = [VideoTrack::new(0, Size::new(1920.0, 1080.0))];
//! assert!(validation::validate_video(&tracks));
//!
//! let oversized = [VideoTrack::new(0, Size::new(4000.0, 2000.0))];
//! assert!(!validation::validate_video(&oversized));
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::config::MAX_VIDEO_TRACK_DIMENSION;
use crate::geometry::Size;
use crate::metadata::VideoTrack;

/// Why a video was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VideoRejection {
    /// The largest track size is below one pixel in some axis, including
    /// the case of no video track at all.
    NoUsableTrack(Size),
    /// The largest track size exceeds [`MAX_VIDEO_TRACK_DIMENSION`].
    Oversized(Size),
}

impl VideoRejection {
    /// The component-wise maximum track size that triggered the rejection.
    pub fn max_track_size(&self) -> Size {
        match self {
            VideoRejection::NoUsableTrack(size) | VideoRejection::Oversized(size) => *size,
        }
    }
}

impl Display for VideoRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            VideoRejection::NoUsableTrack(size) => write!(f, "Invalid video size: {size}"),
            VideoRejection::Oversized(size) => write!(
                f,
                "Invalid video dimensions: {size} (limit {MAX_VIDEO_TRACK_DIMENSION} per axis)"
            ),
        }
    }
}

/// Returns `true` if a decoded image size is usable.
pub fn validate_image(size: Size) -> bool {
    !size.is_degenerate()
}

/// The largest width and the largest height over all tracks.
///
/// Each axis is maximised independently, so the result need not match any
/// single track. An empty track list yields [`Size::ZERO`].
pub fn max_track_size(tracks: &[VideoTrack]) -> Size {
    tracks
        .iter()
        .fold(Size::ZERO, |max, track| max.component_max(track.natural_size))
}

/// Check a video's tracks, returning the reason for rejection if any.
///
/// Does not log; see [`check_video`] for the logging variant.
pub fn video_rejection(tracks: &[VideoTrack]) -> Option<VideoRejection> {
    let max_size = max_track_size(tracks);
    if max_size.width < 1.0 || max_size.height < 1.0 {
        return Some(VideoRejection::NoUsableTrack(max_size));
    }
    if max_size.width > MAX_VIDEO_TRACK_DIMENSION || max_size.height > MAX_VIDEO_TRACK_DIMENSION {
        return Some(VideoRejection::Oversized(max_size));
    }
    None
}

/// Check a video's tracks, logging the reason on rejection.
///
/// On success returns the maximum track size.
pub fn check_video(tracks: &[VideoTrack]) -> Result<Size, VideoRejection> {
    match video_rejection(tracks) {
        Some(rejection) => {
            log::error!("{rejection}");
            Err(rejection)
        }
        None => Ok(max_track_size(tracks)),
    }
}

/// Returns `true` if a video's tracks are usable for thumbnailing.
pub fn validate_video(tracks: &[VideoTrack]) -> bool {
    check_video(tracks).is_ok()
}
