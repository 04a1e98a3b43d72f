use crate::foundation::core::{Canvas, Iteration};
use crate::foundation::error::{GossipError, GossipResult};
use crate::render::frame::FrameRGBA;

/// Longest per-frame delay a GIF can express (65535 centiseconds).
pub const MAX_FRAME_DELAY_MS: u32 = 655_350;

/// GIF delays are stored in centiseconds; any other delay would be truncated on encode.
pub const FRAME_DELAY_STEP_MS: u32 = 10;

/// Reject delays a GIF cannot store exactly.
pub(crate) fn check_frame_delay(frame_delay_ms: u32) -> GossipResult<()> {
    if !(FRAME_DELAY_STEP_MS..=MAX_FRAME_DELAY_MS).contains(&frame_delay_ms)
        || frame_delay_ms % FRAME_DELAY_STEP_MS != 0
    {
        return Err(GossipError::encoding(format!(
            "frame delay must be a multiple of {FRAME_DELAY_STEP_MS} ms in \
             {FRAME_DELAY_STEP_MS}..={MAX_FRAME_DELAY_MS}, got {frame_delay_ms}"
        )));
    }
    Ok(())
}

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Size of every frame.
    pub canvas: Canvas,
    /// How long each frame is shown, in milliseconds.
    pub frame_delay_ms: u32,
}

impl SinkConfig {
    /// Check the delay is representable.
    pub fn validate(&self) -> GossipResult<()> {
        check_frame_delay(self.frame_delay_ms)
    }
}

/// Sink contract for consuming frames in round order.
///
/// Ordering contract: `push_frame` is called in strictly increasing [`Iteration`] order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> GossipResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: Iteration, frame: &FrameRGBA) -> GossipResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> GossipResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(Iteration, FrameRGBA)>,
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

    /// Frames in the order they were pushed.
    pub fn frames(&self) -> &[(Iteration, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> GossipResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: Iteration, frame: &FrameRGBA) -> GossipResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> GossipResult<()> {
        self.finished = true;
        Ok(())
    }
}
