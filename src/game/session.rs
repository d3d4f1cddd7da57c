//! Explicit game session state, advanced one tick at a time

use super::scoring::{MatchOutcome, Matcher};
use super::types::{SessionCommand, SessionConfig, SessionStatus, TickReport};
use crate::camera::FrameSource;
use crate::error::{TangramError, TangramResult};
use crate::shapes::ShapeLibrary;
use crate::vision::{DetectedPieces, DetectionResult, PieceDetector};
use std::time::{Duration, Instant};

/// Current shape, countdown and pause state for one player
pub struct GameSession {
    config: SessionConfig,
    matcher: Matcher,
    shape_names: Vec<String>,
    current: usize,
    started_at: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
    tick: u64,
    last_outcome: MatchOutcome,
}

impl GameSession {
    pub fn new(library: &ShapeLibrary, matcher: Matcher, config: SessionConfig, now: Instant) -> Self {
        let shape_names = library.list_names();
        let current = config
            .start_shape
            .as_ref()
            .and_then(|wanted| shape_names.iter().position(|name| name == wanted))
            .unwrap_or(0);

        Self {
            config,
            matcher,
            shape_names,
            current,
            started_at: now,
            paused_at: None,
            paused_total: Duration::ZERO,
            tick: 0,
            last_outcome: MatchOutcome::default(),
        }
    }

    pub fn current_shape(&self) -> Option<&str> {
        self.shape_names.get(self.current).map(String::as_str)
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Play time so far, not counting paused stretches
    pub fn elapsed(&self, now: Instant) -> Duration {
        let wall = now.saturating_duration_since(self.started_at);
        let paused_now = self
            .paused_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or(Duration::ZERO);
        wall.saturating_sub(self.paused_total + paused_now)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.config.game_duration.saturating_sub(self.elapsed(now))
    }

    pub fn status(&self, now: Instant) -> SessionStatus {
        if self.is_paused() {
            SessionStatus::Paused
        } else if self.remaining(now).is_zero() {
            SessionStatus::TimeUp
        } else {
            SessionStatus::Running
        }
    }

    /// Apply an external command. Returns false when the loop should stop.
    pub fn apply(&mut self, command: SessionCommand, now: Instant) -> bool {
        log::debug!("Session command: {:?}", command);
        match command {
            SessionCommand::TogglePause => self.toggle_pause(now),
            SessionCommand::Reset => self.reset(now),
            SessionCommand::NextShape => self.next_shape(now),
            SessionCommand::SelectShape(name) => {
                if let Err(e) = self.select_shape(&name, now) {
                    log::warn!("{e}");
                }
            }
            SessionCommand::Stop => return false,
        }
        true
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.paused_at.take() {
            Some(at) => {
                self.paused_total += now.saturating_duration_since(at);
                log::info!("▶️ Resumed");
            }
            None => {
                self.paused_at = Some(now);
                log::info!("⏸️ Paused");
            }
        }
    }

    /// Restart the countdown for the current shape
    pub fn reset(&mut self, now: Instant) {
        self.started_at = now;
        self.paused_total = Duration::ZERO;
        if self.paused_at.is_some() {
            self.paused_at = Some(now);
        }
        self.last_outcome = MatchOutcome::default();
    }

    /// Move to the next shape in name order, wrapping around
    pub fn next_shape(&mut self, now: Instant) {
        if self.shape_names.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.shape_names.len();
        log::info!("🔄 Next shape: {}", self.shape_names[self.current]);
        self.reset(now);
    }

    pub fn select_shape(&mut self, name: &str, now: Instant) -> TangramResult<()> {
        let index = self
            .shape_names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| TangramError::ShapeNotFound {
                name: name.to_string(),
            })?;
        self.current = index;
        self.reset(now);
        Ok(())
    }

    /// Capture, detect and score one frame. Paused sessions skip the camera.
    pub fn tick<S: FrameSource>(
        &mut self,
        now: Instant,
        detector: &mut PieceDetector<S>,
        library: &ShapeLibrary,
    ) -> TickReport {
        if self.is_paused() {
            self.tick += 1;
            return self.report(now, DetectedPieces::new(), false);
        }
        let detection = detector.detect_pieces();
        self.score_detection(now, detection, library)
    }

    /// Score an already computed detection result for this tick
    pub fn score_detection(
        &mut self,
        now: Instant,
        detection: DetectionResult,
        library: &ShapeLibrary,
    ) -> TickReport {
        self.tick += 1;

        let outcome = match self.current_shape().and_then(|name| library.get(name)) {
            Some(shape) => self.matcher.score(&detection.pieces, &shape.pieces),
            None => {
                log::warn!("Current shape {:?} is not in the library", self.current_shape());
                MatchOutcome::default()
            }
        };
        self.last_outcome = outcome;

        self.report(now, detection.pieces, detection.captured)
    }

    fn report(&self, now: Instant, detected: DetectedPieces, captured: bool) -> TickReport {
        TickReport {
            tick: self.tick,
            shape: self.current_shape().unwrap_or_default().to_string(),
            status: self.status(now),
            detected,
            outcome: self.last_outcome.clone(),
            captured,
            remaining: self.remaining(now),
            victory: self.last_outcome.score >= self.config.victory_score,
        }
    }
}
