//! # mediathumb
//!
//! Validate image and video attachments and produce small preview
//! thumbnails from them.
//!
//! `mediathumb` returns each thumbnail as an in-memory
//! [`image::DynamicImage`] sized to a caller-supplied bound, or a typed
//! [`ThumbnailError`] explaining which precondition failed. Images are
//! decoded with the [`image`](https://crates.io/crates/image) crate; video
//! frames are captured through FFmpeg via
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next).
//!
//! ## Quick Start
//!
//! ### Thumbnail an Image
//!
//! ```no_run
//! use mediathumb::ImageThumbnailer;
//!
//! // The longer side becomes 500 px: a 2000×1000 photo yields 500×250.
//! let thumbnail = ImageThumbnailer::new().thumbnail("photo.jpg", 500.0).unwrap();
//! thumbnail.image().save("photo_thumb.png").unwrap();
//! ```
//!
//! ### Thumbnail a Video
//!
//! ```no_run
//! use mediathumb::{Size, VideoFrameExtractor};
//!
//! let extractor = VideoFrameExtractor::new();
//! let still = extractor
//!     .thumbnail_with_max_size("clip.mp4", Size::new(640.0, 640.0))
//!     .unwrap();
//! assert!(still.width() <= 640 && still.height() <= 640);
//! ```
//!
//! ## Sizing Policies
//!
//! - **Images** use the *longer-side* policy: the longer axis becomes exactly
//!   the requested dimension and the shorter one follows, rounded. The result
//!   must be strictly smaller than the original in both axes, otherwise the
//!   call fails with [`ThumbnailError::Dimension`].
//! - **Videos** use the *fit-within* policy: the upright frame shrinks to fit
//!   a bounding box (capped at 1024 per axis) and is never enlarged.
//!
//! ## Validation
//!
//! Videos whose largest track width or height is below 1 or above 3072
//! pixels are rejected with [`ThumbnailError::InvalidVideo`]. Images must
//! pass a header-only structural probe before they are fully decoded.
//!
//! ## Threading
//!
//! Every call is synchronous and blocking, with no shared state between
//! calls. Run them off latency-sensitive threads.
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `async` | `thumbnail_async` methods running on Tokio's blocking pool |
//! | `rayon` | `thumbnail_many` methods distributing a batch across rayon threads |
//! | `full` | Enables all of the above |
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod backend;
pub mod config;
mod conversion;
pub mod error;
pub mod ffmpeg;
#[cfg(feature = "async")]
pub mod future;
pub mod geometry;
pub mod image_thumbnail;
pub mod metadata;
pub mod planner;
#[cfg(feature = "rayon")]
mod rayon;
pub mod thumbnail;
pub mod validation;
pub mod video_thumbnail;

pub use backend::{
    FfmpegVideoAsset, FfmpegVideoSource, FrameRequest, ImageCodec, ImageCrateCodec, VideoAsset,
    VideoSource,
};
pub use config::{
    MAX_VIDEO_STILL_DIMENSION, MAX_VIDEO_TRACK_DIMENSION, ResizeFilter, ThumbnailOptions,
    VIDEO_FRAME_OFFSET,
};
pub use error::{ErrorKind, ThumbnailError};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
#[cfg(feature = "async")]
pub use future::ThumbnailFuture;
pub use geometry::Size;
pub use image_thumbnail::ImageThumbnailer;
pub use metadata::{Rotation, VideoTrack};
pub use thumbnail::Thumbnail;
pub use validation::VideoRejection;
pub use video_thumbnail::VideoFrameExtractor;
