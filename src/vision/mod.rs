//! Piece detection for the tangram table
//!
//! This module turns camera frames into at most one detected piece per color:
//! HSV segmentation, contour extraction, rotated-rectangle geometry and a
//! size/aspect heuristic for the piece type.

pub mod classify;
pub mod color;
pub mod config;
pub mod detector;
pub mod pieces;
pub mod region;
pub mod segment;

#[cfg(test)]
mod tests;

// Re-export main types and functions
pub use classify::{PieceType, classify};
pub use color::{ColorCalibration, DEFAULT_CALIBRATION_FILE, HsvRange, PieceColor};
pub use config::DetectionConfig;
pub use detector::{DetectionResult, FrameAnalyzer, PieceDetector};
pub use pieces::{
    DetectedPiece, DetectedPieces, angle_distance, half_turn_distance, normalize_angle,
};
pub use region::{Region, extract_regions};
