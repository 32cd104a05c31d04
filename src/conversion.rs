//! Internal helpers shared by the FFmpeg backend.
//!
//! Pixel-plane copying and timestamp rescaling between [`Duration`], stream
//! time bases, and FFmpeg's container-level `AV_TIME_BASE`.

use std::time::Duration;

use ffmpeg_next::{Rational, frame::Video as VideoFrame};
use image::{DynamicImage, RgbImage};

/// Copy an RGB24 frame into a tightly-packed buffer.
///
/// FFmpeg frames often carry per-row padding (stride > width × 3); this
/// strips it so the result can go straight to [`RgbImage::from_raw`].
pub(crate) fn rgb_frame_to_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_bytes = (width as usize) * 3;
    let rows = height as usize;
    let data = video_frame.data(0);

    if stride == row_bytes {
        data[..row_bytes * rows].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_bytes * rows);
        for row in 0..rows {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_bytes]);
        }
        buffer
    }
}

/// Wrap an RGB24 frame as an image.
pub(crate) fn rgb_frame_to_image(
    video_frame: &VideoFrame,
    width: u32,
    height: u32,
) -> Option<DynamicImage> {
    let buffer = rgb_frame_to_buffer(video_frame, width, height);
    RgbImage::from_raw(width, height, buffer).map(DynamicImage::ImageRgb8)
}

/// Convert a [`Duration`] to a timestamp in the stream's time base.
pub(crate) fn duration_to_stream_timestamp(duration: Duration, time_base: Rational) -> i64 {
    let seconds = duration.as_secs_f64();
    let numerator = f64::from(time_base.numerator());
    let denominator = f64::from(time_base.denominator());
    if numerator == 0.0 {
        return 0;
    }
    (seconds * denominator / numerator) as i64
}

/// Convert a [`Duration`] to a container-level seek timestamp.
///
/// `Input::seek` with no stream index expects `AV_TIME_BASE` units
/// (microseconds).
pub(crate) fn duration_to_seek_timestamp(duration: Duration) -> i64 {
    i64::try_from(duration.as_micros()).unwrap_or(i64::MAX)
}
