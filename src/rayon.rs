//! Parallel batch thumbnailing.
//!
//! Each request is independent (no shared buffers, no cache), so a batch
//! maps straight onto rayon's pool. One failing file never aborts the rest:
//! every input gets its own `Result`, in input order.

use std::path::Path;

use ::rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::backend::{ImageCodec, VideoSource};
use crate::error::ThumbnailError;
use crate::geometry::Size;
use crate::image_thumbnail::ImageThumbnailer;
use crate::thumbnail::Thumbnail;
use crate::video_thumbnail::VideoFrameExtractor;

impl<C: ImageCodec> ImageThumbnailer<C> {
    /// Thumbnail many images in parallel.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mediathumb::ImageThumbnailer;
    ///
    /// let results = ImageThumbnailer::new().thumbnail_many(&["a.jpg", "b.png"], 256.0);
    /// for result in &results {
    ///     match result {
    ///         Ok(thumbnail) => println!("{}×{}", thumbnail.width(), thumbnail.height()),
    ///         Err(error) => eprintln!("{error}"),
    ///     }
    /// }
    /// ```
    pub fn thumbnail_many<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
        max_dimension: f64,
    ) -> Vec<Result<Thumbnail, ThumbnailError>> {
        log::debug!("Thumbnailing {} images in parallel", paths.len());
        paths
            .par_iter()
            .map(|path| self.thumbnail(path, max_dimension))
            .collect()
    }
}

impl<S: VideoSource> VideoFrameExtractor<S> {
    /// Thumbnail many videos in parallel, each within `max_size`.
    pub fn thumbnail_many<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
        max_size: Size,
    ) -> Vec<Result<Thumbnail, ThumbnailError>> {
        log::debug!("Thumbnailing {} videos in parallel", paths.len());
        paths
            .par_iter()
            .map(|path| self.thumbnail_with_max_size(path, max_size))
            .collect()
    }
}
