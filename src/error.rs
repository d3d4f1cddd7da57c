use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for the detection and scoring pipeline.
pub type TangramResult<T> = Result<T, TangramError>;

/// The error type for camera, calibration and shape-library operations.
#[derive(Debug, Error)]
pub enum TangramError {
    #[error("Camera unavailable: {description}")]
    CameraUnavailable { description: String },

    #[error("Frame capture failed: {description}")]
    CaptureFailed { description: String },

    #[error("Failed to decode frame {path:?}: {source}")]
    FrameDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Shape '{name}' is invalid: {reason}")]
    InvalidShape { name: String, reason: String },

    #[error("Shape '{name}' not found")]
    ShapeNotFound { name: String },

    #[error("Calibration for '{color}' is invalid: {reason}")]
    InvalidCalibration { color: String, reason: String },
}

impl TangramError {
    /// Check if this error only affects the current tick
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TangramError::CaptureFailed { .. } | TangramError::FrameDecode { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TangramError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        TangramError::Json {
            path: path.into(),
            source,
        }
    }
}
