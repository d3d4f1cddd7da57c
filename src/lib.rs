pub mod camera;
pub mod error;
pub mod game;
pub mod shapes;
pub mod vision;

pub use camera::{Camera, FrameSource, ImageSequenceSource, MemoryFrameSource};
pub use error::{TangramError, TangramResult};
pub use game::{GameSession, LoopConfig, Matcher, SessionCommand, TickReport, run_game};
pub use shapes::{ShapeDefinition, ShapeLibrary, TargetPiece};
pub use vision::{DetectedPieces, FrameAnalyzer, PieceColor, PieceDetector, PieceType};
