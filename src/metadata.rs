//! Video track metadata.
//!
//! [`VideoTrack`] describes one video stream inside an opened container:
//! its natural (coded) size and the orientation transform the container asks
//! players to apply. Backends produce these when an asset is opened; the
//! validator and the frame extractor only ever read them.

use std::fmt::{Display, Formatter, Result as FmtResult};

use image::DynamicImage;

use crate::geometry::Size;

/// Metadata for a single video track.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoTrack {
    /// Container stream index of the track.
    pub index: usize,
    /// Size of the coded pictures, before any orientation transform.
    pub natural_size: Size,
    /// Preferred orientation transform for display.
    pub rotation: Rotation,
}

impl VideoTrack {
    /// Create a track with no orientation transform.
    pub fn new(index: usize, natural_size: Size) -> Self {
        Self {
            index,
            natural_size,
            rotation: Rotation::None,
        }
    }

    /// Set the track's orientation transform.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Size of the track once its orientation transform is applied.
    pub fn display_size(&self) -> Size {
        self.rotation.apply_to_size(self.natural_size)
    }
}

/// Clockwise rotation that turns coded pictures upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// Pictures are already upright.
    #[default]
    None,
    /// Rotate 90° clockwise.
    Clockwise90,
    /// Rotate 180°.
    Half,
    /// Rotate 270° clockwise (90° counter-clockwise).
    Clockwise270,
}

impl Rotation {
    /// Derive the upright transform from a display-matrix angle.
    ///
    /// `angle` is the counter-clockwise rotation in degrees encoded in the
    /// container, as reported by FFmpeg's `av_display_rotation_get`. Pictures
    /// must be turned by the opposite amount; the result snaps to the nearest
    /// quarter turn. Non-finite angles yield [`Rotation::None`].
    pub fn from_display_angle(angle: f64) -> Self {
        if !angle.is_finite() {
            return Rotation::None;
        }
        let clockwise = (-angle).rem_euclid(360.0);
        match ((clockwise / 90.0).round() as i64).rem_euclid(4) {
            1 => Rotation::Clockwise90,
            2 => Rotation::Half,
            3 => Rotation::Clockwise270,
            _ => Rotation::None,
        }
    }

    /// Returns `true` for quarter turns, which swap width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }

    /// The size a picture of `size` has after this rotation.
    pub fn apply_to_size(self, size: Size) -> Size {
        if self.swaps_axes() {
            size.transposed()
        } else {
            size
        }
    }

    /// Rotate an image.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Rotation::None => image,
            Rotation::Clockwise90 => image.rotate90(),
            Rotation::Half => image.rotate180(),
            Rotation::Clockwise270 => image.rotate270(),
        }
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let degrees = match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Half => 180,
            Rotation::Clockwise270 => 270,
        };
        write!(f, "{degrees}°")
    }
}
