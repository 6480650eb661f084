//! reelcast turns time-ordered visual frames into a deterministic content fingerprint and into
//! duration-bounded animated GIF and WebP byte streams.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: one or more [`FrameDescriptor`]s, each a [`Widget`] plus timing metadata
//! 2. **Normalize**: [`Screens::from_roots`] resolves timing from the first descriptor
//! 3. **Materialize**: bitmaps are painted once, on first use, and shared afterwards
//! 4. **Fingerprint**: [`Screens::hash`] digests pixels, delay and max-age
//! 5. **Clip + encode**: [`truncate`] cuts the timeline to a time budget, then a [`FrameSink`]
//!    (GIF or WebP) encodes the clipped `(bitmap, delay)` sequence
//!
//! Both formats receive the identical clipped sequence, so their timing differs only by each
//! format's native time unit (hundredths of a second for GIF, milliseconds for WebP).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encode;
mod foundation;
mod hash;
mod screens;

/// Renderer adapter contract and reference widgets.
pub mod widget;

pub use encode::filter::{Filter, apply_filters};
pub use encode::gif::{GifSink, GifSinkOpts, LoopCount, ms_to_centiseconds};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig, encode_frames};
pub use encode::webp::{WebpSink, WebpSinkOpts};
pub use foundation::core::{Bitmap, Rgba8};
pub use foundation::error::{ReelError, ReelResult};
pub use hash::fingerprint::{Digest, fingerprint_frames};
pub use screens::aggregate::Screens;
pub use screens::descriptor::{DEFAULT_DELAY_MS, FrameDescriptor, ResolvedTiming, resolve_timing};
pub use screens::paint::PaintOpts;
pub use screens::timeline::{TimedFrame, total_duration_ms, truncate};
pub use widget::Widget;
pub use widget::fill::Fill;
pub use widget::film::Film;
pub use widget::marquee::Marquee;
pub use widget::still::Still;
