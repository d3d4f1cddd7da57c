//! Per-frame piece detection across all seven colors

use super::{
    classify::classify,
    color::{ColorCalibration, PieceColor},
    config::DetectionConfig,
    pieces::{DetectedPiece, DetectedPieces},
    region::extract_regions,
    segment::{frame_to_hsv, segment},
};
use crate::camera::{Camera, FrameSource};
use crate::error::TangramResult;
use image::RgbImage;

/// Outcome of one detection cycle
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub pieces: DetectedPieces,
    /// Regions that survived the area band, before per-color dedup
    pub candidates: usize,
    /// False when the capture failed and `pieces` is empty for that reason
    pub captured: bool,
    pub processing_time_ms: u128,
}

impl DetectionResult {
    fn missed_frame() -> Self {
        Self {
            pieces: DetectedPieces::new(),
            candidates: 0,
            captured: false,
            processing_time_ms: 0,
        }
    }
}

/// Stateless frame analysis: calibration plus thresholds, no camera
#[derive(Debug, Clone, Default)]
pub struct FrameAnalyzer {
    calibration: ColorCalibration,
    config: DetectionConfig,
}

impl FrameAnalyzer {
    pub fn new(calibration: ColorCalibration, config: DetectionConfig) -> Self {
        Self {
            calibration,
            config,
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Segment, extract and classify every color, keeping the largest region per color
    pub fn analyze(&self, frame: &RgbImage) -> DetectionResult {
        let start_time = std::time::Instant::now();
        let hsv = frame_to_hsv(frame);

        let mut pieces = DetectedPieces::new();
        let mut candidates = 0;

        for color in PieceColor::ALL {
            let mask = segment(&hsv, self.calibration.range(color), self.config.morph_radius);
            for region in extract_regions(&mask, &self.config) {
                candidates += 1;
                let piece_type = classify(region.area, region.width, region.height, &self.config);
                let piece = DetectedPiece::new(
                    color,
                    region.center,
                    region.orientation,
                    region.area,
                    piece_type,
                )
                .with_size(region.width, region.height);

                if !pieces.offer(piece) {
                    log::trace!(
                        "Discarding smaller {} fragment (area {:.0})",
                        color,
                        region.area
                    );
                }
            }
        }

        let result = DetectionResult {
            pieces,
            candidates,
            captured: true,
            processing_time_ms: start_time.elapsed().as_millis(),
        };
        log_detection_results(&result);
        result
    }
}

/// Owns the camera and turns each captured frame into a fresh piece set
pub struct PieceDetector<S: FrameSource> {
    camera: Camera<S>,
    analyzer: FrameAnalyzer,
}

impl<S: FrameSource> PieceDetector<S> {
    /// Acquire the camera. Fails with `CameraUnavailable` if it cannot be opened.
    pub fn open(source: S, analyzer: FrameAnalyzer) -> TangramResult<Self> {
        Ok(Self {
            camera: Camera::open(source)?,
            analyzer,
        })
    }

    pub fn frames_read(&self) -> u64 {
        self.camera.frames_read()
    }

    /// Capture one frame and detect pieces in it.
    ///
    /// A failed capture yields an empty result; nothing carries over from the
    /// previous frame.
    pub fn detect_pieces(&mut self) -> DetectionResult {
        match self.camera.capture() {
            Ok(frame) => self.analyzer.analyze(&frame),
            Err(e) => {
                if e.is_transient() {
                    log::warn!("Skipping detection this tick: {e}");
                } else {
                    log::error!("Camera error, skipping detection: {e}");
                }
                DetectionResult::missed_frame()
            }
        }
    }

    /// Release the camera now
    pub fn shutdown(self) {
        self.camera.close();
    }
}

fn log_detection_results(result: &DetectionResult) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    log::debug!(
        "🔍 Detection: {} piece(s) from {} region(s) in {}ms",
        result.pieces.len(),
        result.candidates,
        result.processing_time_ms
    );
    for piece in result.pieces.iter() {
        log::debug!(
            "    {} {} at ({:.0},{:.0}) angle={:.1} area={:.0}",
            piece.color,
            piece.piece_type,
            piece.center.0,
            piece.center.1,
            piece.orientation(),
            piece.area
        );
    }
}
