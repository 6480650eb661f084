use std::sync::{Arc, Mutex};

use crate::encode::filter::{Filter, apply_filters};
use crate::encode::gif::GifSink;
use crate::encode::sink::{FrameSink, encode_frames};
use crate::encode::webp::WebpSink;
use crate::foundation::core::Bitmap;
use crate::foundation::error::{ReelError, ReelResult};
use crate::hash::fingerprint::{Digest, fingerprint_frames};
use crate::screens::descriptor::{
    DEFAULT_DELAY_MS, FrameDescriptor, ResolvedTiming, resolve_timing,
};
use crate::screens::paint::{PaintOpts, paint_all, paint_jobs};
use crate::screens::timeline::{TimedFrame, truncate};

#[derive(Debug)]
enum Source {
    Roots(Vec<FrameDescriptor>),
    Prebuilt(usize),
}

/// A normalized, resolved frame timeline built from one or more [`FrameDescriptor`]s.
///
/// Timing is resolved once at construction (see [`resolve_timing`]). Bitmaps are painted lazily on
/// the first call that needs them and then shared by every later hash or encode call, including
/// concurrent ones: the first caller paints while the others wait for its result.
#[derive(Debug)]
pub struct Screens {
    source: Source,
    timing: ResolvedTiming,
    paint_opts: PaintOpts,
    images: Mutex<Option<Arc<Vec<Bitmap>>>>,
}

impl Screens {
    /// Build from descriptors. The descriptors are copied; nothing is painted yet.
    pub fn from_roots(roots: &[FrameDescriptor]) -> Self {
        Self {
            source: Source::Roots(roots.to_vec()),
            timing: resolve_timing(roots),
            paint_opts: PaintOpts::default(),
            images: Mutex::new(None),
        }
    }

    /// Build from already painted frames shown `delay_ms` apart (`0` resolves to the default).
    pub fn from_bitmaps(bitmaps: Vec<Bitmap>, delay_ms: u32) -> Self {
        Self {
            source: Source::Prebuilt(bitmaps.len()),
            timing: ResolvedTiming {
                delay_ms: if delay_ms == 0 {
                    DEFAULT_DELAY_MS
                } else {
                    delay_ms
                },
                ..ResolvedTiming::default()
            },
            paint_opts: PaintOpts::default(),
            images: Mutex::new(Some(Arc::new(bitmaps))),
        }
    }

    /// Replace the painting options used on first materialization.
    pub fn with_paint_opts(mut self, opts: PaintOpts) -> Self {
        self.paint_opts = opts;
        self
    }

    /// True when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        match &self.source {
            Source::Roots(roots) => roots.is_empty(),
            Source::Prebuilt(n) => *n == 0,
        }
    }

    /// Descriptors this timeline was built from (empty for [`Screens::from_bitmaps`]).
    pub fn roots(&self) -> &[FrameDescriptor] {
        match &self.source {
            Source::Roots(roots) => roots,
            Source::Prebuilt(_) => &[],
        }
    }

    /// Resolved timing.
    pub fn timing(&self) -> ResolvedTiming {
        self.timing
    }

    /// Resolved per-frame delay in milliseconds.
    pub fn delay_ms(&self) -> u32 {
        self.timing.delay_ms
    }

    /// Resolved max-age in seconds.
    pub fn max_age_secs(&self) -> u32 {
        self.timing.max_age_secs
    }

    /// Resolved full-animation request.
    pub fn show_full_animation(&self) -> bool {
        self.timing.show_full_animation
    }

    /// Number of logical output frames, computed without painting.
    pub fn frame_count(&self) -> usize {
        match &self.source {
            Source::Roots(roots) => match roots.as_slice() {
                [only] => only.widget.frame_count(),
                many => many.len(),
            },
            Source::Prebuilt(n) => *n,
        }
    }

    /// Whether bitmaps have been painted (or were supplied) already.
    pub fn is_materialized(&self) -> bool {
        self.images.lock().map(|g| g.is_some()).unwrap_or(false)
    }

    /// Painted frames, painting them on first use.
    ///
    /// A failed paint leaves the cache empty so a later call retries from scratch.
    #[tracing::instrument(skip(self), fields(frames = self.frame_count()))]
    pub fn bitmaps(&self) -> ReelResult<Arc<Vec<Bitmap>>> {
        let mut guard = self
            .images
            .lock()
            .map_err(|_| ReelError::render("screen cache lock poisoned"))?;
        if let Some(images) = guard.as_ref() {
            tracing::debug!("screen cache hit");
            return Ok(Arc::clone(images));
        }

        let jobs = paint_jobs(self.roots())?;
        let images = Arc::new(paint_all(&jobs, &self.paint_opts)?);
        tracing::debug!(painted = images.len(), "screen cache filled");
        *guard = Some(Arc::clone(&images));
        Ok(images)
    }

    /// Deterministic fingerprint over painted pixels, delay and max-age.
    #[tracing::instrument(skip(self))]
    pub fn hash(&self) -> ReelResult<Digest> {
        let images = self.bitmaps()?;
        Ok(fingerprint_frames(
            &images,
            self.timing.delay_ms,
            self.timing.max_age_secs,
        ))
    }

    /// Animated GIF clipped to `max_duration_ms` (`0` = unlimited).
    pub fn encode_gif(&self, max_duration_ms: u32) -> ReelResult<Vec<u8>> {
        self.encode_gif_with_filters(max_duration_ms, &[])
    }

    /// Animated GIF clipped to `max_duration_ms`, with `filters` applied to each frame.
    pub fn encode_gif_with_filters(
        &self,
        max_duration_ms: u32,
        filters: &[Filter],
    ) -> ReelResult<Vec<u8>> {
        self.encode_with(&mut GifSink::default(), max_duration_ms, filters)
    }

    /// Animated WebP clipped to `max_duration_ms` (`0` = unlimited).
    pub fn encode_webp(&self, max_duration_ms: u32) -> ReelResult<Vec<u8>> {
        self.encode_webp_with_filters(max_duration_ms, &[])
    }

    /// Animated WebP clipped to `max_duration_ms`, with `filters` applied to each frame.
    pub fn encode_webp_with_filters(
        &self,
        max_duration_ms: u32,
        filters: &[Filter],
    ) -> ReelResult<Vec<u8>> {
        self.encode_with(&mut WebpSink::default(), max_duration_ms, filters)
    }

    /// Clip the timeline to `max_duration_ms`, apply `filters` and stream the result into `sink`.
    ///
    /// An empty timeline yields empty bytes without calling the sink.
    #[tracing::instrument(skip(self, sink))]
    pub fn encode_with(
        &self,
        sink: &mut dyn FrameSink,
        max_duration_ms: u32,
        filters: &[Filter],
    ) -> ReelResult<Vec<u8>> {
        let images = self.bitmaps()?;
        let timeline: Vec<TimedFrame<'_>> = images
            .iter()
            .map(|bitmap| TimedFrame {
                bitmap,
                delay_ms: self.timing.delay_ms,
            })
            .collect();
        let clipped = truncate(&timeline, max_duration_ms);
        tracing::debug!(
            frames_in = timeline.len(),
            frames_out = clipped.len(),
            "timeline truncated"
        );

        if filters.is_empty() {
            return encode_frames(sink, &clipped);
        }
        let filtered = clipped
            .iter()
            .map(|f| apply_filters(f.bitmap, filters))
            .collect::<ReelResult<Vec<_>>>()?;
        let filtered_timeline: Vec<TimedFrame<'_>> = filtered
            .iter()
            .zip(&clipped)
            .map(|(bitmap, f)| TimedFrame {
                bitmap,
                delay_ms: f.delay_ms,
            })
            .collect();
        encode_frames(sink, &filtered_timeline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/screens/aggregate.rs"]
mod tests;
