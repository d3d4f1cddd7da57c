//! Heuristic piece-type classification from region size and shape

use super::config::DetectionConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keeps the aspect ratio finite for zero-width regions
const ASPECT_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceType {
    LargeTriangle,
    MediumTriangle,
    SmallTriangle,
    Square,
    Parallelogram,
}

impl PieceType {
    pub const ALL: [PieceType; 5] = [
        PieceType::LargeTriangle,
        PieceType::MediumTriangle,
        PieceType::SmallTriangle,
        PieceType::Square,
        PieceType::Parallelogram,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PieceType::LargeTriangle => "large_triangle",
            PieceType::MediumTriangle => "medium_triangle",
            PieceType::SmallTriangle => "small_triangle",
            PieceType::Square => "square",
            PieceType::Parallelogram => "parallelogram",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aspect ratio of a rectangle, always >= 1 for non-degenerate sides
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    width.max(height) / (width.min(height) + ASPECT_EPSILON)
}

/// Map region area and rectangle sides to a piece type.
///
/// Elongated regions are triangles graded by area; everything else is a
/// square. Parallelograms are never produced: area and aspect ratio alone
/// cannot tell one apart from a triangle.
pub fn classify(area: f64, width: f64, height: f64, config: &DetectionConfig) -> PieceType {
    if aspect_ratio(width, height) > config.elongation_threshold {
        if area > config.large_area {
            PieceType::LargeTriangle
        } else if area > config.medium_area {
            PieceType::MediumTriangle
        } else {
            PieceType::SmallTriangle
        }
    } else {
        PieceType::Square
    }
}
