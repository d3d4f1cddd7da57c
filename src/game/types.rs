// Types and enums for the game session
use super::scoring::MatchOutcome;
use crate::vision::DetectedPieces;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Paused,
    TimeUp,
}

/// Requests from the outside world, applied at the next tick boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    TogglePause,
    Reset,
    NextShape,
    SelectShape(String),
    Stop,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub game_duration: Duration,
    /// Score at or above which the current shape counts as solved
    pub victory_score: f64,
    /// Shape to start with; falls back to the first listed shape
    pub start_shape: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_duration: Duration::from_secs(180),
            victory_score: 85.0,
            start_shape: Some("swan".to_string()),
        }
    }
}

/// Everything the renderer needs for one tick
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub shape: String,
    pub status: SessionStatus,
    pub detected: DetectedPieces,
    pub outcome: MatchOutcome,
    /// False when this tick's capture failed
    pub captured: bool,
    pub remaining: Duration,
    pub victory: bool,
}

impl TickReport {
    pub fn score(&self) -> f64 {
        self.outcome.score
    }
}
