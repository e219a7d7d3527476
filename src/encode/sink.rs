use crate::foundation::error::{StrokecastError, StrokecastResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Display duration of every frame.
    pub frame_delay_ms: u32,
}

impl SinkConfig {
    /// Reject frames that do not match the configured dimensions.
    pub fn check_frame(&self, frame: &FrameRGBA) -> StrokecastResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(StrokecastError::validation(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Sink contract for consuming a frame sequence.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices, starting at 0.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> StrokecastResult<()>;
    /// Push one frame in sequence order.
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> StrokecastResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> StrokecastResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames received so far, with their indices.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> StrokecastResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> StrokecastResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| StrokecastError::encode("push_frame called before begin"))?;
        cfg.check_frame(frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> StrokecastResult<()> {
        self.finished = true;
        Ok(())
    }
}
