//! Target shape library
//!
//! Layouts come from a structured source, the persisted `shapes.json`, or the
//! built-in set, in that order of precedence.

pub mod defaults;
pub mod library;
pub mod source;
pub mod types;


pub use defaults::builtin_shapes;
pub use library::{DEFAULT_SHAPE_FILE, LibraryOrigin, ShapeLibrary, SkippedShape};
pub use source::{ShapeDirSource, ShapeSource};
pub use types::{Difficulty, ShapeDefinition, TargetPiece};
