use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Bitmap;
use crate::foundation::error::{ReelError, ReelResult};

/// GIF loop behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum LoopCount {
    /// Loop forever.
    #[default]
    Infinite,
    /// Play the animation this many extra times.
    Finite(u16),
}

/// Options for [`GifSink`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifSinkOpts {
    /// Loop behavior written to the NETSCAPE extension.
    pub repeat: LoopCount,
    /// NeuQuant speed used when a frame has more than 256 colors (1 = best, 30 = fastest).
    pub quantize_speed: i32,
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self {
            repeat: LoopCount::Infinite,
            quantize_speed: 10,
        }
    }
}

/// Convert a delay to GIF's native unit (hundredths of a second).
///
/// Rounds down, so multiples of 10 ms are exact and anything below 10 ms becomes 0. Delays
/// beyond the 16-bit field saturate.
pub fn ms_to_centiseconds(delay_ms: u32) -> u16 {
    u16::try_from(delay_ms / 10).unwrap_or(u16::MAX)
}

/// Animated GIF adapter.
///
/// Frames with at most 256 distinct colors keep an exact per-frame palette; others are quantized.
/// Each frame is disposed to background so transparency never shows the previous frame.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<::gif::Encoder<Vec<u8>>>,
    size: (u16, u16),
    frames_written: usize,
}

impl GifSink {
    /// Create a new GIF sink.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            size: (0, 0),
            frames_written: 0,
        }
    }
}

impl Default for GifSink {
    fn default() -> Self {
        Self::new(GifSinkOpts::default())
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if !(1..=30).contains(&self.opts.quantize_speed) {
            return Err(ReelError::validation(
                "gif quantize_speed must be within 1..=30",
            ));
        }
        let (Ok(width), Ok(height)) = (u16::try_from(cfg.width), u16::try_from(cfg.height)) else {
            return Err(ReelError::validation(format!(
                "gif frames must fit in 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        };
        if width == 0 || height == 0 {
            return Err(ReelError::validation("gif width/height must be non-zero"));
        }

        let mut encoder = ::gif::Encoder::new(Vec::new(), width, height, &[])
            .map_err(|e| ReelError::encode(format!("failed to create gif encoder: {e}")))?;
        let repeat = match self.opts.repeat {
            LoopCount::Infinite => ::gif::Repeat::Infinite,
            LoopCount::Finite(n) => ::gif::Repeat::Finite(n),
        };
        encoder
            .set_repeat(repeat)
            .map_err(|e| ReelError::encode(format!("failed to set gif repeat: {e}")))?;

        self.encoder = Some(encoder);
        self.size = (width, height);
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &Bitmap, delay_ms: u32) -> ReelResult<()> {
        let (width, height) = self.size;
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| ReelError::encode("gif sink: push_frame called before begin"))?;
        if frame.size() != (u32::from(width), u32::from(height)) {
            return Err(ReelError::validation(format!(
                "gif frame is {}x{}, expected {width}x{height}",
                frame.width(),
                frame.height()
            )));
        }

        let mut pixels = frame.data().to_vec();
        let mut gif_frame =
            ::gif::Frame::from_rgba_speed(width, height, &mut pixels, self.opts.quantize_speed);
        gif_frame.delay = ms_to_centiseconds(delay_ms);
        gif_frame.dispose = ::gif::DisposalMethod::Background;

        encoder
            .write_frame(&gif_frame)
            .map_err(|e| ReelError::encode(format!("failed to write gif frame: {e}")))?;
        self.frames_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> ReelResult<Vec<u8>> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| ReelError::encode("gif sink: finish called before begin"))?;
        let bytes = encoder
            .into_inner()
            .map_err(|e| ReelError::encode(format!("failed to finalize gif: {e}")))?;
        tracing::debug!(
            frames = self.frames_written,
            bytes = bytes.len(),
            "gif encoded"
        );
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
