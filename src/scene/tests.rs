// src/scene/tests.rs

use super::*;
use crate::surface::PixelFormat;
use test_log::test;

fn reference_scene() -> BouncingCircle {
    BouncingCircle::new(SceneConfig::default())
}

#[test]
fn bounce_is_periodic() {
    let period = 4.0;
    for i in 0..400 {
        let t = i as f32 * 0.05;
        let a = bounce_position(t, period, 100.0, 700.0);
        let b = bounce_position(t + period, period, 100.0, 700.0);
        assert!(
            (a - b).abs() < 1e-3,
            "position({t}) = {a} but position({} ) = {b}",
            t + period
        );
    }
}

#[test]
fn bounce_stays_within_edges() {
    let (left, right) = (100.0, 700.0);
    for i in 0..1000 {
        let t = i as f32 * 0.037;
        let pos = bounce_position(t, 4.0, left, right);
        assert!(pos >= left - 1e-3 && pos <= right + 1e-3, "pos {pos} at t {t}");
    }
}

#[test]
fn bounce_hits_both_edges() {
    // t = 0 is the left edge, half a period later the right edge.
    assert!((bounce_position(0.0, 4.0, 100.0, 700.0) - 100.0).abs() < 1e-3);
    assert!((bounce_position(2.0, 4.0, 100.0, 700.0) - 700.0).abs() < 1e-3);
}

#[test]
fn draw_fills_background_and_circle() {
    let scene = reference_scene();
    let mut frame = FrameBuffer::new(400, 300, 400, PixelFormat::Rgba8888);
    scene.draw(&mut frame, 0.0).unwrap();

    let bg = PixelFormat::Rgba8888.pack(20, 20, 30);
    let fg = PixelFormat::Rgba8888.pack(100, 150, 255);

    // At t = 0 the circle sits at the left travel edge, vertically centered.
    assert_eq!(frame.pixel_at(100, 150), Some(fg));
    // Corners are background.
    assert_eq!(frame.pixel_at(0, 0), Some(bg));
    assert_eq!(frame.pixel_at(399, 299), Some(bg));
    // Just outside the radius is background.
    assert_eq!(frame.pixel_at(100, 150 + 81), Some(bg));
}

#[test]
fn draw_is_deterministic_for_a_given_clock() {
    let scene = reference_scene();
    let mut a = FrameBuffer::new(320, 240, 320, PixelFormat::Rgba8888);
    let mut b = FrameBuffer::new(320, 240, 320, PixelFormat::Rgba8888);
    scene.draw(&mut a, 1.3).unwrap();
    scene.draw(&mut b, 1.3).unwrap();
    assert_eq!(a.raw_pixels(), b.raw_pixels());
}

#[test]
fn draw_uses_stride_not_width_for_row_offsets() {
    let scene = reference_scene();
    // Stride four pixels wider than the row; mark the padding with a
    // sentinel so any width-based indexing shows up as corruption.
    let mut frame = FrameBuffer::new(300, 200, 304, PixelFormat::Rgba8888);
    let sentinel = 0xDEAD_BEEF;
    for y in 0..200usize {
        for x in 300..304usize {
            frame.raw_pixels_mut()[y * 304 + x] = sentinel;
        }
    }

    scene.draw(&mut frame, 0.7).unwrap();

    let bg = PixelFormat::Rgba8888.pack(20, 20, 30);
    for y in 0..200 {
        // Right-edge column painted correctly on every row.
        assert_eq!(frame.pixel_at(299, y), Some(bg), "row {y} right edge");
        // Padding untouched.
        for x in 300..304usize {
            assert_eq!(
                frame.raw_pixels()[y as usize * 304 + x],
                sentinel,
                "row {y} padding {x}"
            );
        }
    }
}

#[test]
fn draw_tolerates_degenerate_dimensions() {
    let scene = reference_scene();
    for (w, h) in [(0, 0), (0, 100), (100, 0), (1, 1)] {
        let mut frame = FrameBuffer::new(w, h, w, PixelFormat::Rgba8888);
        scene.draw(&mut frame, 2.5).unwrap();
    }
}

#[test]
fn draw_respects_pixel_format() {
    let scene = reference_scene();
    let mut frame = FrameBuffer::new(64, 64, 64, PixelFormat::Argb8888);
    scene.draw(&mut frame, 0.0).unwrap();
    assert_eq!(
        frame.pixel_at(0, 0),
        Some(PixelFormat::Argb8888.pack(20, 20, 30))
    );
}

#[test]
fn narrow_frame_pins_circle_to_margin() {
    let scene = reference_scene();
    // width - margin < margin: travel collapses to a single point.
    for t in [0.0, 1.0, 3.7] {
        assert!((scene.center_x(t, 150) - 100.0).abs() < 1e-3);
    }
}
