//! Renderer adapter contract and a handful of reference widgets.
//!
//! The pipeline only ever talks to [`Widget`]. Layout engines, text shaping and the rest of a
//! real widget toolkit live outside this crate and plug in by implementing the trait.

/// Solid-color box.
pub mod fill;
/// Explicit frame sequences.
pub mod film;
/// Horizontally scrolling content.
pub mod marquee;
/// Single prepared or decoded bitmaps.
pub mod still;

use crate::foundation::core::Bitmap;
use crate::foundation::error::ReelResult;

/// A paintable visual subtree.
///
/// Contract:
/// - `frame_count()` is stable and `>= 1` for a given configuration.
/// - `paint(i)` is a pure function of `i` for `i` in `[0, frame_count())`. Callers memoize the
///   output and may call `paint` from several threads at once.
pub trait Widget: Send + Sync + std::fmt::Debug {
    /// Width and height of every painted frame.
    fn size(&self) -> (u32, u32);

    /// Number of distinct animation steps. Static content reports 1.
    fn frame_count(&self) -> usize {
        1
    }

    /// Paint animation step `frame`.
    fn paint(&self, frame: usize) -> ReelResult<Bitmap>;
}

pub(crate) fn check_frame_index(frame: usize, frame_count: usize) -> ReelResult<()> {
    if frame >= frame_count {
        return Err(crate::foundation::error::ReelError::render(format!(
            "frame index {frame} out of range (frame_count={frame_count})"
        )));
    }
    Ok(())
}
