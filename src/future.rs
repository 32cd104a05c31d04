//! Async wrappers around the blocking pipelines.
//!
//! Decoding and resampling are CPU- and I/O-bound and never yield, so
//! calling them from an async task stalls the runtime. The `*_async`
//! methods move the work onto Tokio's blocking pool via
//! `tokio::task::spawn_blocking` and hand back a [`ThumbnailFuture`].
//!
//! Dropping the future does not stop the blocking work; it runs to
//! completion and its result is discarded.
//!
//! # Example
//!
//! ```no_run
//! use mediathumb::{ImageThumbnailer, ThumbnailError, VideoFrameExtractor};
//!
//! # async fn example() -> Result<(), ThumbnailError> {
//! let image = ImageThumbnailer::new().thumbnail_async("photo.jpg", 320.0).await?;
//! let still = VideoFrameExtractor::new().thumbnail_async("clip.mp4").await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::backend::{ImageCodec, VideoSource};
use crate::error::ThumbnailError;
use crate::geometry::Size;
use crate::image_thumbnail::ImageThumbnailer;
use crate::thumbnail::Thumbnail;
use crate::video_thumbnail::VideoFrameExtractor;

/// A future resolving to a thumbnail produced on a blocking thread.
pub struct ThumbnailFuture {
    handle: JoinHandle<Result<Thumbnail, ThumbnailError>>,
}

impl Future for ThumbnailFuture {
    type Output = Result<Thumbnail, ThumbnailError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|result| {
            result.unwrap_or_else(|error| Err(ThumbnailError::TaskFailed(error.to_string())))
        })
    }
}

impl<C: ImageCodec + Clone + 'static> ImageThumbnailer<C> {
    /// Run [`thumbnail`](ImageThumbnailer::thumbnail) on Tokio's blocking
    /// pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn thumbnail_async<P: AsRef<Path>>(&self, path: P, max_dimension: f64) -> ThumbnailFuture {
        let thumbnailer = self.clone();
        let path = path.as_ref().to_path_buf();
        ThumbnailFuture {
            handle: tokio::task::spawn_blocking(move || thumbnailer.thumbnail(path, max_dimension)),
        }
    }
}

impl<S: VideoSource + Clone + 'static> VideoFrameExtractor<S> {
    /// Run [`thumbnail`](VideoFrameExtractor::thumbnail) on Tokio's blocking
    /// pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn thumbnail_async<P: AsRef<Path>>(&self, path: P) -> ThumbnailFuture {
        let extractor = self.clone();
        let path = path.as_ref().to_path_buf();
        ThumbnailFuture {
            handle: tokio::task::spawn_blocking(move || extractor.thumbnail(path)),
        }
    }

    /// Run [`thumbnail_with_max_size`](VideoFrameExtractor::thumbnail_with_max_size)
    /// on Tokio's blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn thumbnail_with_max_size_async<P: AsRef<Path>>(
        &self,
        path: P,
        max_size: Size,
    ) -> ThumbnailFuture {
        let extractor = self.clone();
        let path = path.as_ref().to_path_buf();
        ThumbnailFuture {
            handle: tokio::task::spawn_blocking(move || {
                extractor.thumbnail_with_max_size(path, max_size)
            }),
        }
    }
}
