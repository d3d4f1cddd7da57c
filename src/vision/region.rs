//! Region extraction: outer contours and their minimum-area rotated rectangles

use super::config::DetectionConfig;
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::geometry::min_area_rect;
use imageproc::point::Point;

/// A connected mask region described by its oriented bounding rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Area enclosed by the outer boundary, in pixels
    pub area: f64,
    pub center: (f64, f64),
    pub width: f64,
    pub height: f64,
    /// Direction of the longer rectangle side, degrees in [0, 180)
    pub orientation: f64,
}

/// Find outer regions of a mask whose area lies inside the configured band
pub fn extract_regions(mask: &GrayImage, config: &DetectionConfig) -> Vec<Region> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .filter_map(|contour| {
            // Degenerate traces (single pixels, lines) have no enclosing rectangle
            if contour.points.len() < 3 {
                return None;
            }
            let area = polygon_area(&contour.points);
            if area <= 0.0 || !config.accepts_area(area) {
                log::trace!(
                    "Dropping region with area {:.0} outside [{:.0}, {:.0}]",
                    area,
                    config.min_area,
                    config.max_area
                );
                return None;
            }
            Some(describe_rect(area, &min_area_rect(&contour.points)))
        })
        .collect()
}

/// Shoelace area of a closed boundary trace
fn polygon_area(points: &[Point<i32>]) -> f64 {
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    twice.abs() as f64 / 2.0
}

/// Center, side lengths and orientation of a rectangle given by its corners.
///
/// Orientation is measured in image coordinates (x right, y down), so positive
/// angles turn clockwise on screen. It is folded into [0, 180) because a
/// rectangle looks the same after a half turn.
fn describe_rect(area: f64, corners: &[Point<i32>; 4]) -> Region {
    let center = corners.iter().fold((0.0, 0.0), |(sx, sy), p| {
        (sx + p.x as f64 / 4.0, sy + p.y as f64 / 4.0)
    });

    // The corner farthest from the first one is diagonal; the other two share a side with it
    let origin = corners[0];
    let mut neighbours: Vec<(f64, f64)> = corners[1..]
        .iter()
        .map(|p| ((p.x - origin.x) as f64, (p.y - origin.y) as f64))
        .collect();
    neighbours.sort_by(|a, b| length(*a).total_cmp(&length(*b)));
    let side_a = neighbours[0];
    let side_b = neighbours[1];

    let width = length(side_b);
    let height = length(side_a);
    let orientation = side_b.1.atan2(side_b.0).to_degrees().rem_euclid(180.0);
    let orientation = if orientation >= 180.0 { 0.0 } else { orientation };

    Region {
        area,
        center,
        width,
        height,
        orientation,
    }
}

fn length((dx, dy): (f64, f64)) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_polygon_area_of_square_trace() {
        let points = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert_abs_diff_eq!(polygon_area(&points), 100.0);
    }

    #[test]
    fn test_describe_axis_aligned_rect() {
        let corners = [
            Point::new(10, 20),
            Point::new(110, 20),
            Point::new(110, 60),
            Point::new(10, 60),
        ];
        let region = describe_rect(4000.0, &corners);
        assert_abs_diff_eq!(region.center.0, 60.0);
        assert_abs_diff_eq!(region.center.1, 40.0);
        assert_abs_diff_eq!(region.width, 100.0);
        assert_abs_diff_eq!(region.height, 40.0);
        assert_abs_diff_eq!(region.orientation, 0.0);
    }

    #[test]
    fn test_describe_ignores_corner_order() {
        // Corners listed with the diagonal second
        let corners = [
            Point::new(0, 0),
            Point::new(30, 80),
            Point::new(0, 80),
            Point::new(30, 0),
        ];
        let region = describe_rect(2400.0, &corners);
        assert_abs_diff_eq!(region.width, 80.0);
        assert_abs_diff_eq!(region.height, 30.0);
        assert_abs_diff_eq!(region.orientation, 90.0);
    }

    #[test]
    fn test_empty_mask_has_no_regions() {
        let mask = GrayImage::new(40, 40);
        assert!(extract_regions(&mask, &DetectionConfig::default()).is_empty());
    }
}
