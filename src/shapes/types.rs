//! Target layout schema shared by the shape file, the shape directory and the matcher

use crate::error::{TangramError, TangramResult};
use crate::vision::{PieceColor, PieceType, normalize_angle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Where one piece should end up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPiece {
    pub color: PieceColor,
    pub center: (f64, f64),
    angle: f64,
    pub piece_type: PieceType,
}

impl TargetPiece {
    /// A non-finite angle is replaced by 0
    pub fn new(color: PieceColor, center: (f64, f64), angle: f64, piece_type: PieceType) -> Self {
        if !angle.is_finite() {
            log::warn!("Target {} has angle {}, using 0", color, angle);
        }
        Self {
            color,
            center,
            angle: normalize_angle(angle),
            piece_type,
        }
    }

    /// Orientation in degrees, always in [0, 360)
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

/// A named target layout, nominally one piece per color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDefinition {
    pub name: String,
    pub difficulty: Difficulty,
    pub pieces: Vec<TargetPiece>,
}

impl ShapeDefinition {
    pub fn new(name: impl Into<String>, difficulty: Difficulty, pieces: Vec<TargetPiece>) -> Self {
        Self {
            name: name.into(),
            difficulty,
            pieces,
        }
    }

    /// Parse one library entry with strict field and literal checks
    pub fn from_value(key: &str, value: serde_json::Value) -> TangramResult<Self> {
        let shape: ShapeDefinition =
            serde_json::from_value(value).map_err(|e| TangramError::InvalidShape {
                name: key.to_string(),
                reason: e.to_string(),
            })?;
        shape.validated(key)
    }

    /// Reject non-finite numbers and empty layouts; wrap angles into [0, 360)
    pub fn validated(mut self, key: &str) -> TangramResult<Self> {
        let invalid = |reason: String| TangramError::InvalidShape {
            name: key.to_string(),
            reason,
        };

        if self.pieces.is_empty() {
            return Err(invalid("shape has no pieces".to_string()));
        }
        for (i, piece) in self.pieces.iter_mut().enumerate() {
            let (x, y) = piece.center;
            if !(x.is_finite() && y.is_finite() && piece.angle.is_finite()) {
                return Err(invalid(format!("piece {i} ({}) has a non-finite value", piece.color)));
            }
            piece.angle = normalize_angle(piece.angle);
        }

        let mut seen = [false; PieceColor::COUNT];
        for piece in &self.pieces {
            if std::mem::replace(&mut seen[piece.color.index()], true) {
                log::warn!(
                    "Shape '{}' lists {} more than once; only one can ever match",
                    key,
                    piece.color
                );
            }
        }
        if self.pieces.len() != PieceColor::COUNT {
            log::debug!("Shape '{}' has {} pieces", key, self.pieces.len());
        }

        Ok(self)
    }
}
