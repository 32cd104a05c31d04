//! Video frame extraction tests.
//!
//! The pipeline tests use an in-memory video source. Tests against FFmpeg
//! require fixture files from `tests/fixtures/generate_fixtures.sh` and
//! return early when they are absent.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::{DynamicImage, RgbImage};
use mediathumb::{
    ErrorKind, FrameRequest, Rotation, Size, ThumbnailError, ThumbnailOptions, VIDEO_FRAME_OFFSET,
    VideoAsset, VideoFrameExtractor, VideoSource, VideoTrack, planner,
};

// ── In-memory source ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum FrameMode {
    /// Honour the request like a well-behaved backend.
    Fit,
    /// Ignore the bound and return the full upright frame.
    FullSize,
    /// Produce nothing.
    Fail,
}

#[derive(Clone)]
struct FakeSource {
    exists: bool,
    openable: bool,
    tracks: Vec<VideoTrack>,
    duration: Option<Duration>,
    mode: FrameMode,
    opens: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<FrameRequest>>>,
}

impl FakeSource {
    fn with_track(width: f64, height: f64) -> Self {
        Self {
            exists: true,
            openable: true,
            tracks: vec![VideoTrack::new(0, Size::new(width, height))],
            duration: Some(Duration::from_secs(5)),
            mode: FrameMode::Fit,
            opens: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn opens(&self) -> usize {
        *self.opens.lock().unwrap()
    }

    fn requests(&self) -> Vec<FrameRequest> {
        self.requests.lock().unwrap().clone()
    }
}

struct FakeAsset {
    tracks: Vec<VideoTrack>,
    duration: Option<Duration>,
    mode: FrameMode,
    requests: Arc<Mutex<Vec<FrameRequest>>>,
}

impl VideoSource for FakeSource {
    fn file_exists(&self, _path: &Path) -> bool {
        self.exists
    }

    fn open(&self, path: &Path) -> Result<Box<dyn VideoAsset>, ThumbnailError> {
        *self.opens.lock().unwrap() += 1;
        if !self.openable {
            return Err(ThumbnailError::InvalidVideo(format!(
                "could not open {}",
                path.display()
            )));
        }
        Ok(Box::new(FakeAsset {
            tracks: self.tracks.clone(),
            duration: self.duration,
            mode: self.mode,
            requests: Arc::clone(&self.requests),
        }))
    }
}

impl VideoAsset for FakeAsset {
    fn video_tracks(&self) -> &[VideoTrack] {
        &self.tracks
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn extract_frame(&mut self, request: &FrameRequest) -> Option<DynamicImage> {
        self.requests.lock().unwrap().push(request.clone());
        let track = self.tracks.first()?;
        let upright = if request.apply_track_transform {
            track.display_size()
        } else {
            track.natural_size
        };
        let size = match self.mode {
            FrameMode::Fit => planner::fit_within(upright, request.max_size).ok()?,
            FrameMode::FullSize => upright,
            FrameMode::Fail => return None,
        };
        let (width, height) = size.to_pixels()?;
        Some(DynamicImage::ImageRgb8(RgbImage::new(width, height)))
    }
}

// ── Validation ────────────────────────────────────────────────────

#[test]
fn oversized_track_is_invalid_video() {
    let source = FakeSource::with_track(4000.0, 2000.0);
    let error = VideoFrameExtractor::with_source(source.clone())
        .thumbnail("clip.mp4")
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidVideo);
    assert!(
        error.to_string().contains("Invalid video dimensions"),
        "unexpected message: {error}"
    );
    assert!(source.requests().is_empty());
}

#[test]
fn zero_sized_track_is_invalid_video() {
    let source = FakeSource::with_track(0.0, 0.0);
    let error = VideoFrameExtractor::with_source(source.clone())
        .thumbnail("clip.mp4")
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidVideo);
    assert!(
        error.to_string().contains("Invalid video size"),
        "unexpected message: {error}"
    );
    assert!(source.requests().is_empty());
}

#[test]
fn container_without_video_tracks_is_invalid_video() {
    let source = FakeSource {
        tracks: Vec::new(),
        ..FakeSource::with_track(1.0, 1.0)
    };
    let error = VideoFrameExtractor::with_source(source)
        .thumbnail("audio.m4a")
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidVideo);
}

#[test]
fn unopenable_container_is_invalid_video() {
    let source = FakeSource {
        openable: false,
        ..FakeSource::with_track(1920.0, 1080.0)
    };
    let error = VideoFrameExtractor::with_source(source)
        .thumbnail("clip.mp4")
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidVideo);
}

#[test]
fn missing_file_is_reported_before_opening() {
    let source = FakeSource {
        exists: false,
        ..FakeSource::with_track(1920.0, 1080.0)
    };
    let error = VideoFrameExtractor::with_source(source.clone())
        .thumbnail("clip.mp4")
        .unwrap_err();
    assert!(matches!(error, ThumbnailError::FileMissing { .. }));
    assert_eq!(source.opens(), 0);
}

// ── Bounding ──────────────────────────────────────────────────────

#[test]
fn requested_bound_is_clamped_to_1024() {
    let source = FakeSource::with_track(1920.0, 1080.0);
    let thumbnail = VideoFrameExtractor::with_source(source.clone())
        .thumbnail_with_max_size("clip.mp4", Size::new(2000.0, 2000.0))
        .expect("Failed to thumbnail video");

    let requests = source.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].max_size, Size::new(1024.0, 1024.0));
    assert!(requests[0].apply_track_transform);
    assert_eq!((thumbnail.width(), thumbnail.height()), (1024, 576));
    assert_eq!(thumbnail.source_size(), Size::new(1920.0, 1080.0));
}

#[test]
fn default_bound_is_1024_square() {
    let source = FakeSource::with_track(1080.0, 1920.0);
    let thumbnail = VideoFrameExtractor::with_source(source.clone())
        .thumbnail("clip.mp4")
        .expect("Failed to thumbnail video");
    assert_eq!(source.requests()[0].max_size, Size::new(1024.0, 1024.0));
    assert_eq!((thumbnail.width(), thumbnail.height()), (576, 1024));
}

#[test]
fn smaller_bound_is_honoured() {
    let source = FakeSource::with_track(1920.0, 1080.0);
    let thumbnail = VideoFrameExtractor::with_source(source)
        .thumbnail_with_max_size("clip.mp4", Size::new(320.0, 320.0))
        .expect("Failed to thumbnail video");
    assert_eq!((thumbnail.width(), thumbnail.height()), (320, 180));
}

#[test]
fn small_video_is_not_enlarged() {
    let source = FakeSource::with_track(320.0, 240.0);
    let thumbnail = VideoFrameExtractor::with_source(source)
        .thumbnail("clip.mp4")
        .expect("Failed to thumbnail video");
    assert_eq!((thumbnail.width(), thumbnail.height()), (320, 240));
}

#[test]
fn degenerate_bound_is_a_dimension_error() {
    let source = FakeSource::with_track(1920.0, 1080.0);
    let error = VideoFrameExtractor::with_source(source.clone())
        .thumbnail_with_max_size("clip.mp4", Size::new(0.0, 512.0))
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Dimension);
    assert!(source.requests().is_empty());
}

#[test]
fn sub_pixel_bound_is_a_dimension_error() {
    for bound in [Size::new(0.5, 0.5), Size::new(0.9, 512.0), Size::new(512.0, 0.1)] {
        let source = FakeSource::with_track(1920.0, 1080.0);
        let error = VideoFrameExtractor::with_source(source.clone())
            .thumbnail_with_max_size("clip.mp4", bound)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Dimension, "bound {bound}");
        assert!(source.requests().is_empty());
    }
}

#[test]
fn one_pixel_bound_yields_one_pixel() {
    let source = FakeSource::with_track(1920.0, 1080.0);
    let thumbnail = VideoFrameExtractor::with_source(source)
        .thumbnail_with_max_size("clip.mp4", Size::new(1.0, 1.0))
        .expect("Failed to thumbnail video");
    assert_eq!((thumbnail.width(), thumbnail.height()), (1, 1));
}

#[test]
fn oversized_backend_frame_is_shrunk() {
    let source = FakeSource {
        mode: FrameMode::FullSize,
        ..FakeSource::with_track(1920.0, 1080.0)
    };
    let thumbnail = VideoFrameExtractor::with_source(source)
        .thumbnail_with_max_size("clip.mp4", Size::new(640.0, 640.0))
        .expect("Failed to thumbnail video");
    assert_eq!((thumbnail.width(), thumbnail.height()), (640, 360));
}

#[test]
fn rotated_track_yields_upright_frame() {
    let source = FakeSource {
        tracks: vec![
            VideoTrack::new(0, Size::new(1920.0, 1080.0)).with_rotation(Rotation::Clockwise90),
        ],
        ..FakeSource::with_track(1.0, 1.0)
    };
    let thumbnail = VideoFrameExtractor::with_source(source)
        .thumbnail("clip.mp4")
        .expect("Failed to thumbnail video");
    assert_eq!((thumbnail.width(), thumbnail.height()), (576, 1024));
}

// ── Capture time ──────────────────────────────────────────────────

#[test]
fn frame_is_captured_at_one_sixtieth_of_a_second() {
    let source = FakeSource::with_track(1920.0, 1080.0);
    let _ = VideoFrameExtractor::with_source(source.clone())
        .thumbnail("clip.mp4")
        .expect("Failed to thumbnail video");
    assert_eq!(source.requests()[0].at, VIDEO_FRAME_OFFSET);
    assert_eq!(VIDEO_FRAME_OFFSET.as_nanos(), 16_666_667);
}

#[test]
fn unknown_duration_still_uses_offset() {
    let source = FakeSource {
        duration: None,
        ..FakeSource::with_track(1920.0, 1080.0)
    };
    let _ = VideoFrameExtractor::with_source(source.clone())
        .thumbnail("clip.mp4")
        .expect("Failed to thumbnail video");
    assert_eq!(source.requests()[0].at, VIDEO_FRAME_OFFSET);
}

#[test]
fn very_short_video_is_captured_at_zero() {
    let source = FakeSource {
        duration: Some(Duration::from_millis(10)),
        ..FakeSource::with_track(1920.0, 1080.0)
    };
    let _ = VideoFrameExtractor::with_source(source.clone())
        .thumbnail("clip.mp4")
        .expect("Failed to thumbnail video");
    assert_eq!(source.requests()[0].at, Duration::ZERO);
}

#[test]
fn custom_frame_offset_is_used() {
    let source = FakeSource::with_track(1920.0, 1080.0);
    let options = ThumbnailOptions::new().with_frame_offset(Duration::from_secs(1));
    let _ = VideoFrameExtractor::with_source(source.clone())
        .with_options(options)
        .thumbnail("clip.mp4")
        .expect("Failed to thumbnail video");
    assert_eq!(source.requests()[0].at, Duration::from_secs(1));
}

#[test]
fn missing_frame_is_a_decode_failure() {
    let source = FakeSource {
        mode: FrameMode::Fail,
        ..FakeSource::with_track(1920.0, 1080.0)
    };
    let error = VideoFrameExtractor::with_source(source)
        .thumbnail("clip.mp4")
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::DecodeFailure);
}

// ── is_valid_video ────────────────────────────────────────────────

#[test]
fn is_valid_video_accepts_typical_track() {
    let extractor = VideoFrameExtractor::with_source(FakeSource::with_track(1920.0, 1080.0));
    assert!(extractor.is_valid_video("clip.mp4"));
}

#[test]
fn is_valid_video_rejects_bad_input() {
    let oversized = VideoFrameExtractor::with_source(FakeSource::with_track(4000.0, 2000.0));
    assert!(!oversized.is_valid_video("clip.mp4"));

    let missing = VideoFrameExtractor::with_source(FakeSource {
        exists: false,
        ..FakeSource::with_track(1920.0, 1080.0)
    });
    assert!(!missing.is_valid_video("clip.mp4"));

    let unopenable = VideoFrameExtractor::with_source(FakeSource {
        openable: false,
        ..FakeSource::with_track(1920.0, 1080.0)
    });
    assert!(!unopenable.is_valid_video("clip.mp4"));
}

// ── FFmpeg backend ────────────────────────────────────────────────

#[test]
fn ffmpeg_sample_video_thumbnail() {
    let path = "tests/fixtures/sample_video.mp4";
    if !Path::new(path).exists() {
        return;
    }

    let extractor = VideoFrameExtractor::new();
    assert!(extractor.is_valid_video(path));

    let thumbnail = extractor
        .thumbnail(path)
        .expect("Failed to thumbnail sample video");
    assert_eq!((thumbnail.width(), thumbnail.height()), (1024, 576));
    assert_eq!(thumbnail.source_size(), Size::new(1920.0, 1080.0));
}

#[test]
fn ffmpeg_small_bound() {
    let path = "tests/fixtures/sample_video.mp4";
    if !Path::new(path).exists() {
        return;
    }

    let thumbnail = VideoFrameExtractor::new()
        .thumbnail_with_max_size(path, Size::new(320.0, 320.0))
        .expect("Failed to thumbnail sample video");
    assert_eq!((thumbnail.width(), thumbnail.height()), (320, 180));
}

#[test]
fn ffmpeg_rotated_video_is_upright() {
    let path = "tests/fixtures/rotated_video.mp4";
    if !Path::new(path).exists() {
        return;
    }

    let thumbnail = VideoFrameExtractor::new()
        .thumbnail(path)
        .expect("Failed to thumbnail rotated video");
    assert!(
        thumbnail.height() > thumbnail.width(),
        "expected portrait frame, got {}×{}",
        thumbnail.width(),
        thumbnail.height()
    );
}

#[test]
fn ffmpeg_oversized_video_is_rejected() {
    let path = "tests/fixtures/oversized_video.mp4";
    if !Path::new(path).exists() {
        return;
    }

    let extractor = VideoFrameExtractor::new();
    assert!(!extractor.is_valid_video(path));
    let error = extractor.thumbnail(path).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidVideo);
}

#[test]
fn ffmpeg_short_video_still_yields_frame() {
    let path = "tests/fixtures/short_video.mp4";
    if !Path::new(path).exists() {
        return;
    }

    let thumbnail = VideoFrameExtractor::new()
        .thumbnail(path)
        .expect("Failed to thumbnail short video");
    assert!(thumbnail.width() > 0 && thumbnail.height() > 0);
}

#[test]
fn ffmpeg_audio_only_file_is_rejected() {
    let path = "tests/fixtures/sample_audio.wav";
    if !Path::new(path).exists() {
        return;
    }

    let error = VideoFrameExtractor::new().thumbnail(path).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidVideo);
}

#[test]
fn ffmpeg_garbage_file_is_rejected() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = directory.path().join("garbage.mp4");
    std::fs::write(&path, b"this is not a media file").expect("Failed to write garbage file");

    let extractor = VideoFrameExtractor::new();
    assert!(!extractor.is_valid_video(&path));
    let error = extractor.thumbnail(&path).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidVideo);
}

#[test]
fn ffmpeg_missing_file_is_reported() {
    let error = VideoFrameExtractor::new()
        .thumbnail("this_file_does_not_exist.mp4")
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::FileMissing);
}
