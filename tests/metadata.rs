//! Track metadata and size geometry tests.

use image::{DynamicImage, RgbImage};
use mediathumb::{Rotation, Size, VideoTrack};

// ── Rotation ──────────────────────────────────────────────────────

#[test]
fn display_angle_is_inverted_to_upright_rotation() {
    // FFmpeg reports counter-clockwise angles.
    assert_eq!(Rotation::from_display_angle(0.0), Rotation::None);
    assert_eq!(Rotation::from_display_angle(90.0), Rotation::Clockwise270);
    assert_eq!(Rotation::from_display_angle(-90.0), Rotation::Clockwise90);
    assert_eq!(Rotation::from_display_angle(180.0), Rotation::Half);
    assert_eq!(Rotation::from_display_angle(-180.0), Rotation::Half);
    assert_eq!(Rotation::from_display_angle(270.0), Rotation::Clockwise90);
}

#[test]
fn display_angle_snaps_to_quarter_turns() {
    assert_eq!(Rotation::from_display_angle(-89.9), Rotation::Clockwise90);
    assert_eq!(Rotation::from_display_angle(1.0), Rotation::None);
    assert_eq!(Rotation::from_display_angle(359.0), Rotation::None);
    assert_eq!(Rotation::from_display_angle(-450.0), Rotation::Clockwise90);
}

#[test]
fn non_finite_angle_is_ignored() {
    assert_eq!(Rotation::from_display_angle(f64::NAN), Rotation::None);
    assert_eq!(Rotation::from_display_angle(f64::INFINITY), Rotation::None);
}

#[test]
fn quarter_turns_swap_axes() {
    assert!(Rotation::Clockwise90.swaps_axes());
    assert!(Rotation::Clockwise270.swaps_axes());
    assert!(!Rotation::None.swaps_axes());
    assert!(!Rotation::Half.swaps_axes());

    let size = Size::new(1920.0, 1080.0);
    assert_eq!(Rotation::Clockwise90.apply_to_size(size), Size::new(1080.0, 1920.0));
    assert_eq!(Rotation::Half.apply_to_size(size), size);
}

#[test]
fn rotating_an_image_turns_its_pixels() {
    let image = DynamicImage::ImageRgb8(RgbImage::new(40, 30));
    let rotated = Rotation::Clockwise90.apply(image.clone());
    assert_eq!((rotated.width(), rotated.height()), (30, 40));

    let rotated = Rotation::Half.apply(image.clone());
    assert_eq!((rotated.width(), rotated.height()), (40, 30));

    let rotated = Rotation::None.apply(image);
    assert_eq!((rotated.width(), rotated.height()), (40, 30));
}

#[test]
fn rotation_display_is_in_degrees() {
    assert_eq!(Rotation::None.to_string(), "0°");
    assert_eq!(Rotation::Clockwise270.to_string(), "270°");
}

// ── VideoTrack ────────────────────────────────────────────────────

#[test]
fn track_display_size_follows_rotation() {
    let track = VideoTrack::new(1, Size::new(1920.0, 1080.0));
    assert_eq!(track.rotation, Rotation::None);
    assert_eq!(track.display_size(), Size::new(1920.0, 1080.0));

    let track = track.with_rotation(Rotation::Clockwise270);
    assert_eq!(track.index, 1);
    assert_eq!(track.natural_size, Size::new(1920.0, 1080.0));
    assert_eq!(track.display_size(), Size::new(1080.0, 1920.0));
}

// ── Size ──────────────────────────────────────────────────────────

#[test]
fn degenerate_sizes() {
    assert!(Size::ZERO.is_degenerate());
    assert!(Size::new(1.0, 0.0).is_degenerate());
    assert!(Size::new(-1.0, 5.0).is_degenerate());
    assert!(Size::new(f64::NAN, 5.0).is_degenerate());
    assert!(!Size::new(0.5, 0.5).is_degenerate());
}

#[test]
fn pixel_holding_sizes() {
    assert!(Size::new(1.0, 1.0).holds_a_pixel());
    assert!(Size::new(1024.0, 3.5).holds_a_pixel());
    assert!(!Size::new(0.5, 0.5).holds_a_pixel());
    assert!(!Size::new(100.0, 0.99).holds_a_pixel());
    assert!(!Size::new(f64::NAN, 100.0).holds_a_pixel());
}

#[test]
fn clamp_only_touches_larger_axes() {
    assert_eq!(
        Size::new(2000.0, 500.0).clamp_to(1024.0),
        Size::new(1024.0, 500.0)
    );
    assert_eq!(
        Size::new(f64::NAN, 500.0).clamp_to(1024.0),
        Size::new(1024.0, 500.0)
    );
}

#[test]
fn pixel_conversion_rounds_and_rejects_empty() {
    assert_eq!(Size::new(499.5, 250.4).to_pixels(), Some((500, 250)));
    assert_eq!(Size::new(0.4, 10.0).to_pixels(), None);
    assert_eq!(Size::ZERO.to_pixels(), None);
    assert_eq!(Size::new(1e12, 10.0).to_pixels(), None);
    assert_eq!(Size::from_pixels(640, 480), Size::new(640.0, 480.0));
}

#[test]
fn component_max_and_transpose() {
    let a = Size::new(100.0, 10.0);
    let b = Size::new(20.0, 200.0);
    assert_eq!(a.component_max(b), Size::new(100.0, 200.0));
    assert_eq!(a.transposed(), Size::new(10.0, 100.0));
}
