//! Replays recorded frames from disk: a single still image or a directory of frames

use super::types::FrameSource;
use crate::error::{TangramError, TangramResult};
use image::RgbImage;
use std::path::{Path, PathBuf};

const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

pub struct ImageSequenceSource {
    root: PathBuf,
    frames: Vec<PathBuf>,
    cursor: usize,
    looping: bool,
}

impl ImageSequenceSource {
    /// A still image always loops; a directory plays once unless `looping` is set
    pub fn new(path: impl Into<PathBuf>, looping: bool) -> Self {
        let root = path.into();
        let looping = looping || root.is_file();
        Self {
            root,
            frames: Vec::new(),
            cursor: 0,
            looping,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Scan for frame files, sorted by name for a stable playback order
    fn scan_frames(root: &Path) -> TangramResult<Vec<PathBuf>> {
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }

        let entries = std::fs::read_dir(root).map_err(|e| TangramError::CameraUnavailable {
            description: format!("cannot read frame directory {:?}: {}", root, e),
        })?;

        let mut frames: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_frame_file(path))
            .collect();
        frames.sort();
        Ok(frames)
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            FRAME_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self) -> TangramResult<()> {
        let frames = Self::scan_frames(&self.root)?;
        if frames.is_empty() {
            return Err(TangramError::CameraUnavailable {
                description: format!("no frames found in {:?}", self.root),
            });
        }
        log::debug!("Found {} frame(s) in {:?}", frames.len(), self.root);
        self.frames = frames;
        self.cursor = 0;
        Ok(())
    }

    fn read(&mut self) -> TangramResult<RgbImage> {
        if self.cursor >= self.frames.len() {
            if !self.looping || self.frames.is_empty() {
                return Err(TangramError::CaptureFailed {
                    description: format!("end of frame sequence {:?}", self.root),
                });
            }
            self.cursor = 0;
        }

        let path = &self.frames[self.cursor];
        self.cursor += 1;
        let frame = image::open(path).map_err(|source| TangramError::FrameDecode {
            path: path.clone(),
            source,
        })?;
        Ok(frame.to_rgb8())
    }

    fn release(&mut self) {
        self.frames.clear();
        self.cursor = 0;
    }

    fn describe(&self) -> String {
        format!("frames from {}", self.root.display())
    }
}
