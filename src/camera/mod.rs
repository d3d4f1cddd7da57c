// Camera module - frame sources and the owned camera handle
// The detector holds the only Camera; it is opened once and released on drop.

pub mod memory;
pub mod sequence;
pub mod types;


pub use memory::MemoryFrameSource;
pub use sequence::ImageSequenceSource;
pub use types::{Camera, FrameSource};
