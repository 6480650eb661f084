use webp_animation::{EncoderOptions, EncodingConfig, EncodingType};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Bitmap;
use crate::foundation::error::{ReelError, ReelResult};

/// Options for [`WebpSink`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WebpSinkOpts {
    /// Encode frames losslessly. Lossy output is smaller but no longer pixel-exact.
    pub lossless: bool,
    /// libwebp quality factor in `0.0..=100.0` (compression effort when lossless).
    pub quality: f32,
}

impl Default for WebpSinkOpts {
    fn default() -> Self {
        Self {
            lossless: true,
            quality: 75.0,
        }
    }
}

/// Animated WebP adapter.
///
/// WebP frames are placed by millisecond timestamps, so delays are carried exactly. libwebp may
/// still store a single-frame animation as a still image, whose decoded duration is 0; callers
/// must not rely on the timing of one-frame WebP output.
///
/// libwebp also merges byte-identical consecutive frames into one frame spanning their combined
/// duration, so the decoded frame count can be lower than the number of pushed frames. GIF output
/// keeps every frame.
pub struct WebpSink {
    opts: WebpSinkOpts,
    encoder: Option<webp_animation::Encoder>,
    size: (u32, u32),
    timestamp_ms: i32,
    frames_written: usize,
}

impl WebpSink {
    /// Create a new WebP sink.
    pub fn new(opts: WebpSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            size: (0, 0),
            timestamp_ms: 0,
            frames_written: 0,
        }
    }

    fn encoder_options(&self) -> ReelResult<EncoderOptions> {
        if !(0.0..=100.0).contains(&self.opts.quality) {
            return Err(ReelError::validation(
                "webp quality must be within 0.0..=100.0",
            ));
        }
        let encoding_type = if self.opts.lossless {
            EncodingType::Lossless
        } else {
            EncodingType::Lossy(Default::default())
        };
        Ok(EncoderOptions {
            encoding_config: Some(EncodingConfig {
                encoding_type,
                quality: self.opts.quality,
                ..Default::default()
            }),
            ..Default::default()
        })
    }
}

impl Default for WebpSink {
    fn default() -> Self {
        Self::new(WebpSinkOpts::default())
    }
}

impl FrameSink for WebpSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::validation("webp width/height must be non-zero"));
        }
        let options = self.encoder_options()?;
        let encoder =
            webp_animation::Encoder::new_with_options((cfg.width, cfg.height), options)
                .map_err(|e| ReelError::encode(format!("failed to create webp encoder: {e:?}")))?;

        self.encoder = Some(encoder);
        self.size = (cfg.width, cfg.height);
        self.timestamp_ms = 0;
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &Bitmap, delay_ms: u32) -> ReelResult<()> {
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| ReelError::encode("webp sink: push_frame called before begin"))?;
        if frame.size() != self.size {
            return Err(ReelError::validation(format!(
                "webp frame is {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.size.0,
                self.size.1
            )));
        }
        // Timestamps must strictly increase, which a zero delay would violate.
        if delay_ms == 0 {
            return Err(ReelError::validation("webp frame delay must be > 0"));
        }
        let next = i32::try_from(delay_ms)
            .ok()
            .and_then(|d| self.timestamp_ms.checked_add(d))
            .ok_or_else(|| ReelError::validation("webp animation duration overflows i32 ms"))?;

        encoder
            .add_frame(frame.data(), self.timestamp_ms)
            .map_err(|e| ReelError::encode(format!("failed to add webp frame: {e:?}")))?;
        self.timestamp_ms = next;
        self.frames_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> ReelResult<Vec<u8>> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| ReelError::encode("webp sink: finish called before begin"))?;
        let data = encoder
            .finalize(self.timestamp_ms)
            .map_err(|e| ReelError::encode(format!("failed to finalize webp: {e:?}")))?;
        let bytes = data.to_vec();
        tracing::debug!(
            frames = self.frames_written,
            duration_ms = self.timestamp_ms,
            bytes = bytes.len(),
            "webp encoded"
        );
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/webp.rs"]
mod tests;
