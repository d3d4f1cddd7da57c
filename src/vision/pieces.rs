//! Detected pieces and the per-color table that holds one frame's result

use super::classify::PieceType;
use super::color::PieceColor;

/// Wrap any angle in degrees into [0, 360). Non-finite input maps to 0.
pub fn normalize_angle(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest circular distance between two angles, in [0, 180]
pub fn angle_distance(a: f64, b: f64) -> f64 {
    let diff = (normalize_angle(a) - normalize_angle(b)).abs();
    diff.min(360.0 - diff)
}

/// Distance between two orientations that are only known up to a half turn, in [0, 90]
///
/// Detected orientations come from a rectangle and live in [0, 180); a target
/// stored at 225 is the same rectangle as one at 45.
pub fn half_turn_distance(a: f64, b: f64) -> f64 {
    angle_distance(a, b).min(angle_distance(a, b + 180.0))
}

/// A piece found in the current frame. Built once, never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedPiece {
    pub color: PieceColor,
    pub center: (f64, f64),
    orientation: f64,
    pub area: f64,
    pub width: f64,
    pub height: f64,
    pub piece_type: PieceType,
}

impl DetectedPiece {
    pub fn new(
        color: PieceColor,
        center: (f64, f64),
        orientation: f64,
        area: f64,
        piece_type: PieceType,
    ) -> Self {
        Self {
            color,
            center,
            orientation: normalize_angle(orientation),
            area,
            width: 0.0,
            height: 0.0,
            piece_type,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Orientation in degrees, always in [0, 360)
    pub fn orientation(&self) -> f64 {
        self.orientation
    }
}

/// At most one detected piece per color, indexed by [`PieceColor::index`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectedPieces {
    slots: [Option<DetectedPiece>; PieceColor::COUNT],
}

impl DetectedPieces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `piece` if its color slot is empty or holds a smaller area.
    /// Returns whether the piece was kept.
    pub fn offer(&mut self, piece: DetectedPiece) -> bool {
        let slot = &mut self.slots[piece.color.index()];
        match slot {
            Some(best) if best.area >= piece.area => false,
            _ => {
                *slot = Some(piece);
                true
            }
        }
    }

    pub fn get(&self, color: PieceColor) -> Option<&DetectedPiece> {
        self.slots[color.index()].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectedPiece> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl FromIterator<DetectedPiece> for DetectedPieces {
    fn from_iter<I: IntoIterator<Item = DetectedPiece>>(iter: I) -> Self {
        let mut pieces = Self::new();
        for piece in iter {
            pieces.offer(piece);
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn piece(color: PieceColor, area: f64) -> DetectedPiece {
        DetectedPiece::new(color, (0.0, 0.0), 0.0, area, PieceType::Square)
    }

    #[test]
    fn test_normalize_angle() {
        assert_abs_diff_eq!(normalize_angle(-10.0), 350.0);
        assert_abs_diff_eq!(normalize_angle(360.0), 0.0);
        assert_abs_diff_eq!(normalize_angle(725.0), 5.0);
        assert!(normalize_angle(-1e-20) < 360.0);
    }

    #[test]
    fn test_angle_distance_wraps() {
        assert_abs_diff_eq!(angle_distance(350.0, 10.0), 20.0);
        assert_abs_diff_eq!(angle_distance(10.0, 350.0), 20.0);
        assert_abs_diff_eq!(angle_distance(0.0, 180.0), 180.0);
        assert_abs_diff_eq!(angle_distance(-90.0, 270.0), 0.0);
    }

    #[test]
    fn test_half_turn_distance() {
        assert_abs_diff_eq!(half_turn_distance(45.0, 225.0), 0.0);
        assert_abs_diff_eq!(half_turn_distance(0.0, 180.0), 0.0);
        assert_abs_diff_eq!(half_turn_distance(10.0, 350.0), 20.0);
        assert_abs_diff_eq!(half_turn_distance(0.0, 270.0), 90.0);
        assert_abs_diff_eq!(half_turn_distance(170.0, 315.0), 35.0);
    }

    #[test]
    fn test_non_finite_angle_maps_to_zero() {
        assert_eq!(normalize_angle(f64::NAN), 0.0);
        assert_eq!(normalize_angle(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_orientation_normalized_on_construction() {
        let p = DetectedPiece::new(PieceColor::Red, (1.0, 2.0), -10.0, 900.0, PieceType::Square);
        assert_abs_diff_eq!(p.orientation(), 350.0);
    }

    #[test]
    fn test_larger_area_replaces_smaller() {
        let mut pieces = DetectedPieces::new();
        assert!(pieces.offer(piece(PieceColor::Red, 1000.0)));
        assert!(pieces.offer(piece(PieceColor::Red, 3000.0)));
        assert!(!pieces.offer(piece(PieceColor::Red, 2000.0)));
        assert!(pieces.offer(piece(PieceColor::Blue, 500.0)));

        assert_eq!(pieces.len(), 2);
        assert_abs_diff_eq!(pieces.get(PieceColor::Red).unwrap().area, 3000.0);
        assert!(pieces.get(PieceColor::Teal).is_none());
    }

    #[test]
    fn test_collect_dedups_by_color() {
        let pieces: DetectedPieces = [
            piece(PieceColor::Green, 10.0),
            piece(PieceColor::Green, 30.0),
            piece(PieceColor::Green, 20.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(pieces.len(), 1);
        assert_abs_diff_eq!(pieces.get(PieceColor::Green).unwrap().area, 30.0);
    }
}
