//! Piece colors and their HSV threshold ranges

use crate::error::{TangramError, TangramResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Where the tuning tool writes its ranges
pub const DEFAULT_CALIBRATION_FILE: &str = "color_calibration.json";

/// One of the seven uniquely colored tangram pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceColor {
    Red,
    Blue,
    Yellow,
    Green,
    Orange,
    Purple,
    Teal,
}

impl PieceColor {
    pub const COUNT: usize = 7;

    pub const ALL: [PieceColor; Self::COUNT] = [
        PieceColor::Red,
        PieceColor::Blue,
        PieceColor::Yellow,
        PieceColor::Green,
        PieceColor::Orange,
        PieceColor::Purple,
        PieceColor::Teal,
    ];

    /// Stable slot index used by per-color tables
    pub fn index(self) -> usize {
        match self {
            PieceColor::Red => 0,
            PieceColor::Blue => 1,
            PieceColor::Yellow => 2,
            PieceColor::Green => 3,
            PieceColor::Orange => 4,
            PieceColor::Purple => 5,
            PieceColor::Teal => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceColor::Red => "red",
            PieceColor::Blue => "blue",
            PieceColor::Yellow => "yellow",
            PieceColor::Green => "green",
            PieceColor::Orange => "orange",
            PieceColor::Purple => "purple",
            PieceColor::Teal => "teal",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Factory threshold range used when no calibration is supplied
    pub fn default_range(self) -> HsvRange {
        let (h_low, h_high) = match self {
            PieceColor::Red => (0, 10),
            PieceColor::Orange => (10, 20),
            PieceColor::Yellow => (20, 30),
            PieceColor::Green => (40, 80),
            PieceColor::Teal => (85, 95),
            PieceColor::Blue => (100, 130),
            PieceColor::Purple => (140, 170),
        };
        HsvRange::new([h_low, 120, 70], [h_high, 255, 255])
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive HSV bounds, 8-bit convention: hue 0..=179, saturation and value 0..=255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// A lower hue above the upper hue wraps through 0 (e.g. red 170..=10)
    pub fn hue_wraps(&self) -> bool {
        self.lower[0] > self.upper[0]
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        let hue_ok = if self.hue_wraps() {
            hsv[0] >= self.lower[0] || hsv[0] <= self.upper[0]
        } else {
            hsv[0] >= self.lower[0] && hsv[0] <= self.upper[0]
        };
        hue_ok
            && (self.lower[1]..=self.upper[1]).contains(&hsv[1])
            && (self.lower[2]..=self.upper[2]).contains(&hsv[2])
    }

    fn validate(&self, color: PieceColor) -> TangramResult<()> {
        if self.lower[0] > 179 || self.upper[0] > 179 {
            return Err(TangramError::InvalidCalibration {
                color: color.to_string(),
                reason: format!(
                    "hue bounds {}..{} exceed 179",
                    self.lower[0], self.upper[0]
                ),
            });
        }
        for channel in 1..3 {
            if self.lower[channel] > self.upper[channel] {
                return Err(TangramError::InvalidCalibration {
                    color: color.to_string(),
                    reason: format!(
                        "channel {} lower bound {} is above upper bound {}",
                        channel, self.lower[channel], self.upper[channel]
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Total mapping from piece color to threshold range
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCalibration {
    ranges: [HsvRange; PieceColor::COUNT],
}

impl Default for ColorCalibration {
    fn default() -> Self {
        Self {
            ranges: PieceColor::ALL.map(PieceColor::default_range),
        }
    }
}

impl ColorCalibration {
    pub fn range(&self, color: PieceColor) -> &HsvRange {
        &self.ranges[color.index()]
    }

    pub fn set_range(&mut self, color: PieceColor, range: HsvRange) {
        self.ranges[color.index()] = range;
    }

    /// Load calibration written by the tuning tool.
    ///
    /// A missing file yields the defaults. Unknown color names and invalid
    /// entries are skipped with a warning, leaving that color at its default.
    pub fn load(path: impl AsRef<Path>) -> TangramResult<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No calibration at {:?}, using default color ranges", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(TangramError::io(path, e)),
        };
        Self::from_json(&text).map_err(|e| TangramError::json(path, e))
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let mut calibration = Self::default();

        for (name, value) in entries {
            let Some(color) = PieceColor::parse(&name) else {
                log::warn!("Ignoring calibration for unknown color '{}'", name);
                continue;
            };
            let range = match serde_json::from_value::<HsvRange>(value) {
                Ok(range) => range,
                Err(e) => {
                    log::warn!("Ignoring calibration for '{}': {}", color, e);
                    continue;
                }
            };
            match range.validate(color) {
                Ok(()) => calibration.set_range(color, range),
                Err(e) => log::warn!("{e}"),
            }
        }

        Ok(calibration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names_round_trip() {
        for color in PieceColor::ALL {
            assert_eq!(PieceColor::parse(color.as_str()), Some(color));
        }
        assert_eq!(PieceColor::parse(" Teal "), Some(PieceColor::Teal));
        assert_eq!(PieceColor::parse("magenta"), None);
    }

    #[test]
    fn test_indices_are_distinct_slots() {
        let mut seen = [false; PieceColor::COUNT];
        for color in PieceColor::ALL {
            assert!(!seen[color.index()]);
            seen[color.index()] = true;
        }
    }

    #[test]
    fn test_wrapping_hue_range() {
        let red = HsvRange::new([170, 100, 100], [10, 255, 255]);
        assert!(red.contains([175, 200, 200]));
        assert!(red.contains([5, 200, 200]));
        assert!(!red.contains([90, 200, 200]));
    }

    #[test]
    fn test_partial_calibration_keeps_defaults() {
        let json = r#"{
            "red": {"lower": [0, 100, 50], "upper": [12, 255, 255]},
            "magenta": {"lower": [0, 0, 0], "upper": [1, 1, 1]},
            "blue": {"lower": [100, 200], "upper": [130, 255, 255]}
        }"#;
        let calibration = ColorCalibration::from_json(json).unwrap();

        assert_eq!(
            *calibration.range(PieceColor::Red),
            HsvRange::new([0, 100, 50], [12, 255, 255])
        );
        assert_eq!(
            *calibration.range(PieceColor::Blue),
            PieceColor::Blue.default_range()
        );
        assert_eq!(
            *calibration.range(PieceColor::Teal),
            PieceColor::Teal.default_range()
        );
    }

    #[test]
    fn test_out_of_range_hue_is_rejected() {
        let json = r#"{"green": {"lower": [40, 120, 70], "upper": [200, 255, 255]}}"#;
        let calibration = ColorCalibration::from_json(json).unwrap();
        assert_eq!(
            *calibration.range(PieceColor::Green),
            PieceColor::Green.default_range()
        );
    }
}
