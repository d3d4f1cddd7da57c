// Game module
// This module scores live detections against the active target shape and
// keeps the session state (shape, countdown, pause) in one explicit struct.

pub mod run_loop;
pub mod scoring;
pub mod session;
pub mod types;


// Re-export the main types and functions for easy access
pub use run_loop::{LoopConfig, run_game};
pub use scoring::{MatchOutcome, Matcher, PieceScore, ScoringConfig};
pub use session::GameSession;
pub use types::{SessionCommand, SessionConfig, SessionStatus, TickReport};
