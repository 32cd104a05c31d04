use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageReader, ImageResult};

use super::ImageCodec;
use crate::config::ResizeFilter;

/// [`ImageCodec`] backed by the [`image`] crate.
///
/// The format is guessed from the file's signature bytes, not its extension.
/// Decoded images are turned upright using their EXIF orientation, so the
/// sizes seen by the planner are display sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateCodec;

impl ImageCrateCodec {
    fn reader(path: &Path) -> std::io::Result<ImageReader<BufReader<File>>> {
        ImageReader::open(path)?.with_guessed_format()
    }

    fn decode_upright(path: &Path) -> ImageResult<DynamicImage> {
        let mut decoder = Self::reader(path)?.into_decoder()?;
        let orientation = decoder.orientation()?;
        let mut image = DynamicImage::from_decoder(decoder)?;
        image.apply_orientation(orientation);
        Ok(image)
    }
}

impl ImageCodec for ImageCrateCodec {
    fn probe(&self, path: &Path) -> bool {
        let reader = match Self::reader(path) {
            Ok(reader) => reader,
            Err(error) => {
                log::debug!("Could not read {}: {error}", path.display());
                return false;
            }
        };
        if reader.format().is_none() {
            log::debug!("Unrecognised image signature: {}", path.display());
            return false;
        }
        // Reads the header only.
        match reader.into_dimensions() {
            Ok((width, height)) => width > 0 && height > 0,
            Err(error) => {
                log::debug!("Malformed image header in {}: {error}", path.display());
                false
            }
        }
    }

    fn decode(&self, path: &Path) -> Option<DynamicImage> {
        match Self::decode_upright(path) {
            Ok(image) => Some(image),
            Err(error) => {
                log::warn!("Could not load original image {}: {error}", path.display());
                None
            }
        }
    }

    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        filter: ResizeFilter,
    ) -> Option<DynamicImage> {
        if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
            return None;
        }
        Some(image.resize_exact(width, height, filter.to_filter_type()))
    }
}
