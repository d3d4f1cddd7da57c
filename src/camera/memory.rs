//! Scripted in-memory frame source

use super::types::FrameSource;
use crate::error::{TangramError, TangramResult};
use image::RgbImage;
use std::collections::VecDeque;

/// Plays back a queue of frames; `None` entries simulate a failed capture.
#[derive(Default)]
pub struct MemoryFrameSource {
    script: VecDeque<Option<RgbImage>>,
    available: bool,
}

impl MemoryFrameSource {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            available: true,
        }
    }

    /// A source whose `open` fails, like an unplugged device
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    pub fn with_frames(frames: impl IntoIterator<Item = RgbImage>) -> Self {
        let mut source = Self::new();
        source.script.extend(frames.into_iter().map(Some));
        source
    }

    pub fn push_frame(&mut self, frame: RgbImage) {
        self.script.push_back(Some(frame));
    }

    pub fn push_failure(&mut self) {
        self.script.push_back(None);
    }
}

impl FrameSource for MemoryFrameSource {
    fn open(&mut self) -> TangramResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(TangramError::CameraUnavailable {
                description: "memory source marked unavailable".to_string(),
            })
        }
    }

    fn read(&mut self) -> TangramResult<RgbImage> {
        match self.script.pop_front() {
            Some(Some(frame)) => Ok(frame),
            Some(None) => Err(TangramError::CaptureFailed {
                description: "scripted capture failure".to_string(),
            }),
            None => Err(TangramError::CaptureFailed {
                description: "no frames queued".to_string(),
            }),
        }
    }

    fn release(&mut self) {
        self.script.clear();
    }

    fn describe(&self) -> String {
        format!("memory source ({} queued)", self.script.len())
    }
}
