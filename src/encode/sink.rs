use crate::foundation::core::Bitmap;
use crate::foundation::error::{ReelError, ReelResult};
use crate::screens::timeline::TimedFrame;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// Sink contract for consuming clipped frames in timeline order.
///
/// `push_frame` is called once per output frame, in order, with the frame's final delay in
/// milliseconds. `finish` returns the complete byte stream; no bytes are observable before it
/// succeeds.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame and its delay.
    fn push_frame(&mut self, frame: &Bitmap, delay_ms: u32) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn finish(&mut self) -> ReelResult<Vec<u8>>;
}

/// Drive `sink` over `frames`.
///
/// All frames must share the first frame's non-zero dimensions. An empty sequence produces an
/// empty byte vector without touching the sink.
pub fn encode_frames(sink: &mut dyn FrameSink, frames: &[TimedFrame<'_>]) -> ReelResult<Vec<u8>> {
    let Some(first) = frames.first() else {
        return Ok(Vec::new());
    };
    let cfg = SinkConfig {
        width: first.bitmap.width(),
        height: first.bitmap.height(),
    };
    if cfg.width == 0 || cfg.height == 0 {
        return Err(ReelError::validation(format!(
            "cannot encode zero-area frames ({}x{})",
            cfg.width, cfg.height
        )));
    }
    if let Some((i, f)) = frames
        .iter()
        .enumerate()
        .find(|(_, f)| f.bitmap.size() != (cfg.width, cfg.height))
    {
        return Err(ReelError::validation(format!(
            "frame {i} is {}x{}, expected {}x{}",
            f.bitmap.width(),
            f.bitmap.height(),
            cfg.width,
            cfg.height
        )));
    }

    sink.begin(cfg)?;
    for f in frames {
        sink.push_frame(f.bitmap, f.delay_ms)?;
    }
    sink.finish()
}

/// In-memory sink for tests and debugging. `finish` returns no bytes.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(Bitmap, u32)>,
    finished: bool,
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

    /// Borrow the captured frames and their delays.
    pub fn frames(&self) -> &[(Bitmap, u32)] {
        &self.frames
    }

    /// Captured delays in push order.
    pub fn delays(&self) -> Vec<u32> {
        self.frames.iter().map(|(_, d)| *d).collect()
    }

    /// Whether `finish` has been called since the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &Bitmap, delay_ms: u32) -> ReelResult<()> {
        self.frames.push((frame.clone(), delay_ms));
        Ok(())
    }

    fn finish(&mut self) -> ReelResult<Vec<u8>> {
        self.finished = true;
        Ok(Vec::new())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
