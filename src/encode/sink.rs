use crate::foundation::error::BadgeloopResult;
use crate::render::compose::Frame;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Animation repeats; `0` loops forever.
    pub loop_count: u16,
}

/// Sink contract for consuming composed frames in display order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BadgeloopResult<()>;
    /// Push one frame with its display duration.
    fn push_frame(&mut self, frame: &Frame, duration_ms: u32) -> BadgeloopResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> BadgeloopResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(Frame, u32)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames with their durations.
    pub fn frames(&self) -> &[(Frame, u32)] {
        &self.frames
    }

    /// Return `true` once `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BadgeloopResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &Frame, duration_ms: u32) -> BadgeloopResult<()> {
        self.frames.push((frame.clone(), duration_ms));
        Ok(())
    }

    fn end(&mut self) -> BadgeloopResult<()> {
        self.ended = true;
        Ok(())
    }
}
