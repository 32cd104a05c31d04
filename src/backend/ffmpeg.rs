use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    format::{Pixel, context::Input, stream::Disposition},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use ffmpeg_sys_next::{AVPacketSideDataType, av_display_rotation_get, av_packet_side_data_get};
use image::DynamicImage;

use super::{FrameRequest, VideoAsset, VideoSource};
use crate::conversion::{
    duration_to_seek_timestamp, duration_to_stream_timestamp, rgb_frame_to_image,
};
use crate::error::ThumbnailError;
use crate::geometry::Size;
use crate::metadata::{Rotation, VideoTrack};
use crate::planner;

/// [`VideoSource`] backed by FFmpeg.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegVideoSource;

impl VideoSource for FfmpegVideoSource {
    fn open(&self, path: &Path) -> Result<Box<dyn VideoAsset>, ThumbnailError> {
        Ok(Box::new(FfmpegVideoAsset::open(path)?))
    }
}

/// A video container opened through FFmpeg.
///
/// Track sizes come from the codec parameters and are the coded picture
/// sizes; orientation comes from the stream's display matrix. Cover-art
/// streams (attached pictures) are not counted as video tracks.
pub struct FfmpegVideoAsset {
    input_context: Input,
    tracks: Vec<VideoTrack>,
    /// Position in `tracks` of the track frames are captured from.
    preferred_track: Option<usize>,
    duration: Option<Duration>,
    path: PathBuf,
}

impl Debug for FfmpegVideoAsset {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FfmpegVideoAsset")
            .field("tracks", &self.tracks)
            .field("preferred_track", &self.preferred_track)
            .field("duration", &self.duration)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl FfmpegVideoAsset {
    /// Open a container and read its video tracks.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbnailError::InvalidVideo`] if FFmpeg cannot initialise,
    /// cannot open the file, or cannot read a video stream's parameters.
    pub fn open(path: &Path) -> Result<Self, ThumbnailError> {
        log::debug!("Opening video asset: {}", path.display());

        ffmpeg_next::init().map_err(|error| {
            ThumbnailError::InvalidVideo(format!("FFmpeg initialisation failed: {error}"))
        })?;

        let input_context = ffmpeg_next::format::input(&path).map_err(|error| {
            ThumbnailError::InvalidVideo(format!("Failed to open {}: {error}", path.display()))
        })?;

        let mut tracks = Vec::new();
        for stream in input_context.streams() {
            if stream.parameters().medium() != Type::Video
                || stream.disposition().contains(Disposition::ATTACHED_PIC)
            {
                continue;
            }

            let index = stream.index();
            let decoder = CodecContext::from_parameters(stream.parameters())
                .and_then(|context| context.decoder().video())
                .map_err(|error| {
                    ThumbnailError::InvalidVideo(format!(
                        "Failed to read parameters of video stream {index}: {error}"
                    ))
                })?;

            tracks.push(
                VideoTrack::new(index, Size::from_pixels(decoder.width(), decoder.height()))
                    .with_rotation(stream_rotation(&stream)),
            );
        }

        let best_index = input_context
            .streams()
            .best(Type::Video)
            .map(|stream| stream.index());
        let preferred_track = best_index
            .and_then(|best| tracks.iter().position(|track| track.index == best))
            .or(if tracks.is_empty() { None } else { Some(0) });

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Some(Duration::from_micros(duration_microseconds as u64))
        } else {
            None
        };

        Ok(Self {
            input_context,
            tracks,
            preferred_track,
            duration,
            path: path.to_path_buf(),
        })
    }

    /// Seek near `request.at`, decode forward, and convert one frame.
    ///
    /// Takes the first frame whose timestamp reaches the requested time. If
    /// the stream ends first, the last decoded frame is used instead.
    fn decode_frame(
        &mut self,
        request: &FrameRequest,
    ) -> Result<Option<DynamicImage>, ThumbnailError> {
        let Some(track) = self
            .preferred_track
            .and_then(|position| self.tracks.get(position))
            .cloned()
        else {
            return Ok(None);
        };

        let (time_base, start_timestamp, mut decoder) = {
            let stream = self.input_context.stream(track.index).ok_or_else(|| {
                ThumbnailError::DecodeFailure(format!("Video stream {} not found", track.index))
            })?;
            let decoder = CodecContext::from_parameters(stream.parameters())?
                .decoder()
                .video()?;
            let start = stream.start_time();
            // AV_NOPTS_VALUE
            let start = if start == i64::MIN { 0 } else { start };
            (stream.time_base(), start, decoder)
        };

        let rotation = if request.apply_track_transform {
            track.rotation
        } else {
            Rotation::None
        };

        // Scale before rotating, so quarter turns scale to the transposed box.
        let coded_size = Size::from_pixels(decoder.width(), decoder.height());
        let upright = planner::fit_within(rotation.apply_to_size(coded_size), request.max_size)?;
        let scaled = rotation.apply_to_size(upright);
        let (scaled_width, scaled_height) = scaled.to_pixels().ok_or_else(|| {
            ThumbnailError::Dimension(format!("scaled frame has invalid size {scaled}"))
        })?;

        let mut scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            scaled_width,
            scaled_height,
            ScalingFlags::BILINEAR,
        )?;

        let target_timestamp =
            start_timestamp.saturating_add(duration_to_stream_timestamp(request.at, time_base));
        if !request.at.is_zero() {
            let seek_timestamp = duration_to_seek_timestamp(request.at);
            if let Err(error) = self.input_context.seek(seek_timestamp, ..seek_timestamp) {
                log::debug!(
                    "Seek to {:?} failed, decoding from the start: {error}",
                    request.at
                );
            }
        }

        let mut decoded_frame = VideoFrame::empty();
        let mut previous_frame = VideoFrame::empty();
        let mut have_previous = false;
        let mut reached = false;

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != track.index {
                continue;
            }
            if let Err(error) = decoder.send_packet(&packet) {
                log::debug!("Skipping undecodable packet: {error}");
                continue;
            }
            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                if reaches(&decoded_frame, target_timestamp) {
                    reached = true;
                    break;
                }
                std::mem::swap(&mut decoded_frame, &mut previous_frame);
                have_previous = true;
            }
            if reached {
                break;
            }
        }

        if !reached && decoder.send_eof().is_ok() {
            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                if reaches(&decoded_frame, target_timestamp) {
                    reached = true;
                    break;
                }
                std::mem::swap(&mut decoded_frame, &mut previous_frame);
                have_previous = true;
            }
        }

        let source_frame = if reached {
            &decoded_frame
        } else if have_previous {
            log::debug!(
                "Stream ended before {:?}; using the last decoded frame",
                request.at
            );
            &previous_frame
        } else {
            return Ok(None);
        };

        let mut rgb_frame = VideoFrame::empty();
        scaler.run(source_frame, &mut rgb_frame)?;
        Ok(rgb_frame_to_image(&rgb_frame, scaled_width, scaled_height)
            .map(|image| rotation.apply(image)))
    }
}

impl VideoAsset for FfmpegVideoAsset {
    fn video_tracks(&self) -> &[VideoTrack] {
        &self.tracks
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn extract_frame(&mut self, request: &FrameRequest) -> Option<DynamicImage> {
        match self.decode_frame(request) {
            Ok(image) => image,
            Err(error) => {
                log::warn!(
                    "Frame extraction failed for {}: {error}",
                    self.path.display()
                );
                None
            }
        }
    }
}

/// Frames without any timestamp are taken as soon as they appear.
fn reaches(frame: &VideoFrame, target_timestamp: i64) -> bool {
    frame
        .timestamp()
        .or_else(|| frame.pts())
        .is_none_or(|pts| pts >= target_timestamp)
}

/// Read the display-matrix rotation of a stream.
fn stream_rotation(stream: &ffmpeg_next::format::stream::Stream<'_>) -> Rotation {
    let parameters = stream.parameters();
    // SAFETY: the parameters pointer is valid for the lifetime of `stream`,
    // and the side-data entry is checked for a full 3×3 matrix before use.
    let angle = unsafe {
        let raw = &*parameters.as_ptr();
        let side_data = av_packet_side_data_get(
            raw.coded_side_data,
            raw.nb_coded_side_data,
            AVPacketSideDataType::AV_PKT_DATA_DISPLAYMATRIX,
        );
        if side_data.is_null()
            || (*side_data).data.is_null()
            || (*side_data).size < 9 * std::mem::size_of::<i32>()
        {
            return Rotation::None;
        }
        av_display_rotation_get((*side_data).data as *const i32)
    };
    Rotation::from_display_angle(angle)
}
