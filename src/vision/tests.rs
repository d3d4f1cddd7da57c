//! Tests for frame-level piece detection on synthetic frames

use crate::camera::MemoryFrameSource;
use crate::vision::{
    DetectionConfig, FrameAnalyzer, PieceColor, PieceDetector, PieceType, angle_distance,
};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

const RED: Rgb<u8> = Rgb([220, 20, 20]);
const BLUE: Rgb<u8> = Rgb([20, 20, 220]);
const GREEN: Rgb<u8> = Rgb([20, 200, 20]);

fn blank_frame() -> RgbImage {
    RgbImage::new(320, 240)
}

fn with_rect(mut frame: RgbImage, x: i32, y: i32, w: u32, h: u32, color: Rgb<u8>) -> RgbImage {
    draw_filled_rect_mut(&mut frame, Rect::at(x, y).of_size(w, h), color);
    frame
}

/// Axis-aligned frame orientation is either 0 or 180 depending on edge order
fn is_horizontal(orientation: f64) -> bool {
    angle_distance(orientation, 0.0) < 2.0 || angle_distance(orientation, 180.0) < 2.0
}

#[test]
fn test_single_piece_geometry() {
    let frame = with_rect(blank_frame(), 50, 50, 100, 60, RED);
    let result = FrameAnalyzer::default().analyze(&frame);

    assert!(result.captured);
    assert_eq!(result.pieces.len(), 1);
    let red = result.pieces.get(PieceColor::Red).unwrap();
    assert!((red.center.0 - 99.5).abs() < 1.5, "center x {}", red.center.0);
    assert!((red.center.1 - 79.5).abs() < 1.5, "center y {}", red.center.1);
    assert!(red.area > 5500.0 && red.area < 6100.0, "area {}", red.area);
    assert!(is_horizontal(red.orientation()));
    assert_eq!(red.piece_type, PieceType::MediumTriangle);
}

#[test]
fn test_largest_fragment_wins_per_color() {
    let frame = with_rect(blank_frame(), 20, 20, 100, 60, RED);
    let frame = with_rect(frame, 200, 150, 40, 40, RED);
    let result = FrameAnalyzer::default().analyze(&frame);

    assert_eq!(result.candidates, 2);
    assert_eq!(result.pieces.len(), 1);
    let red = result.pieces.get(PieceColor::Red).unwrap();
    assert!(red.center.0 < 100.0, "kept the small fragment at {:?}", red.center);
}

#[test]
fn test_one_piece_per_color_across_colors() {
    let frame = with_rect(blank_frame(), 10, 10, 100, 60, RED);
    let frame = with_rect(frame, 150, 10, 80, 80, GREEN);
    let frame = with_rect(frame, 40, 130, 120, 70, BLUE);
    let result = FrameAnalyzer::default().analyze(&frame);

    assert_eq!(result.pieces.len(), 3);
    assert_eq!(
        result.pieces.get(PieceColor::Green).unwrap().piece_type,
        PieceType::Square
    );
    assert_eq!(
        result.pieces.get(PieceColor::Blue).unwrap().piece_type,
        PieceType::LargeTriangle
    );
    for color in [PieceColor::Yellow, PieceColor::Orange, PieceColor::Purple, PieceColor::Teal] {
        assert!(result.pieces.get(color).is_none());
    }
}

#[test]
fn test_noise_below_floor_is_ignored() {
    let frame = with_rect(blank_frame(), 100, 100, 15, 15, RED);
    let result = FrameAnalyzer::default().analyze(&frame);
    assert!(result.pieces.is_empty());
}

#[test]
fn test_background_above_ceiling_is_ignored() {
    let config = DetectionConfig {
        max_area: 3_000.0,
        ..DetectionConfig::default()
    };
    let analyzer = FrameAnalyzer::new(Default::default(), config);
    let frame = with_rect(blank_frame(), 20, 20, 200, 150, BLUE);
    assert!(analyzer.analyze(&frame).pieces.is_empty());
}

#[test]
fn test_rotated_piece_orientation() {
    let (cx, cy) = (160.0_f64, 120.0_f64);
    let angle = 30.0_f64.to_radians();
    let (ux, uy) = (angle.cos(), angle.sin());
    let (vx, vy) = (-uy, ux);
    let corner = |a: f64, b: f64| {
        Point::new(
            (cx + a * 60.0 * ux + b * 25.0 * vx).round() as i32,
            (cy + a * 60.0 * uy + b * 25.0 * vy).round() as i32,
        )
    };
    let polygon = [
        corner(-1.0, -1.0),
        corner(1.0, -1.0),
        corner(1.0, 1.0),
        corner(-1.0, 1.0),
    ];
    let mut frame = blank_frame();
    draw_polygon_mut(&mut frame, &polygon, GREEN);

    let result = FrameAnalyzer::default().analyze(&frame);
    let green = result.pieces.get(PieceColor::Green).unwrap();
    assert!(
        angle_distance(green.orientation(), 30.0) < 4.0,
        "orientation {}",
        green.orientation()
    );
    assert!((green.center.0 - cx).abs() < 2.0);
    assert!((green.center.1 - cy).abs() < 2.0);
    assert!(green.orientation() >= 0.0 && green.orientation() < 360.0);
}

#[test]
fn test_detector_does_not_reuse_previous_frame() {
    let mut source = MemoryFrameSource::new();
    source.push_frame(with_rect(blank_frame(), 50, 50, 100, 60, RED));
    source.push_failure();
    source.push_frame(blank_frame());

    let mut detector = PieceDetector::open(source, FrameAnalyzer::default()).unwrap();

    let first = detector.detect_pieces();
    assert_eq!(first.pieces.len(), 1);

    let failed = detector.detect_pieces();
    assert!(!failed.captured);
    assert!(failed.pieces.is_empty());

    let empty = detector.detect_pieces();
    assert!(empty.captured);
    assert!(empty.pieces.is_empty());
    assert_eq!(detector.frames_read(), 2);
}

#[test]
fn test_scaled_config_grows_thresholds() {
    let config = DetectionConfig::for_resolution(1280, 960);
    assert_eq!(config.min_area, 2_000.0);
    assert_eq!(config.large_area, 32_000.0);
    assert_eq!(config.max_area, 320_000.0);

    let unchanged = DetectionConfig::default().scaled(-1.0);
    assert_eq!(unchanged, DetectionConfig::default());
}
