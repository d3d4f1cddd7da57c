// Frame source trait and the owned camera handle
use crate::error::TangramResult;
use image::RgbImage;

/// Anything that can hand over video frames on request.
///
/// Device selection and resolution are the source's own business; the
/// pipeline only ever asks for the next frame.
pub trait FrameSource {
    /// Acquire the device. Failing here means the pipeline cannot start.
    fn open(&mut self) -> TangramResult<()> {
        Ok(())
    }

    /// Blocking capture of one frame
    fn read(&mut self) -> TangramResult<RgbImage>;

    /// Give the device back. Called exactly once by [`Camera`].
    fn release(&mut self) {}

    fn describe(&self) -> String;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn open(&mut self) -> TangramResult<()> {
        (**self).open()
    }

    fn read(&mut self) -> TangramResult<RgbImage> {
        (**self).read()
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Exclusively owned, opened frame source. Released when dropped.
pub struct Camera<S: FrameSource> {
    source: S,
    frames_read: u64,
    released: bool,
}

impl<S: FrameSource> Camera<S> {
    /// Acquire the source; on failure nothing is held and nothing needs releasing
    pub fn open(mut source: S) -> TangramResult<Self> {
        source.open()?;
        log::info!("Camera opened: {}", source.describe());
        Ok(Self {
            source,
            frames_read: 0,
            released: false,
        })
    }

    pub fn capture(&mut self) -> TangramResult<RgbImage> {
        let frame = self.source.read()?;
        self.frames_read += 1;
        Ok(frame)
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Release now instead of waiting for drop
    pub fn close(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.source.release();
            log::info!(
                "Camera released after {} frames: {}",
                self.frames_read,
                self.source.describe()
            );
        }
    }
}

impl<S: FrameSource> Drop for Camera<S> {
    fn drop(&mut self) {
        self.release_once();
    }
}
