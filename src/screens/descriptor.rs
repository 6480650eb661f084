use std::sync::Arc;

use crate::widget::Widget;

/// Delay applied when the governing descriptor leaves `delay_ms` unset.
pub const DEFAULT_DELAY_MS: u32 = 50;

/// One authored animation root: a paintable subtree plus its timing metadata.
///
/// `0` means "unset" for both `delay_ms` and `max_age_secs`.
#[derive(Clone, Debug)]
pub struct FrameDescriptor {
    /// Paintable subtree.
    pub widget: Arc<dyn Widget>,
    /// Per-frame delay in milliseconds (`0` = unset).
    pub delay_ms: u32,
    /// Cache lifetime hint in seconds (`0` = unset).
    pub max_age_secs: u32,
    /// Whether the caller asks for the whole animation to be shown.
    pub show_full_animation: bool,
}

impl FrameDescriptor {
    /// Create a new descriptor with unset timing.
    pub fn new(widget: impl Widget + 'static) -> Self {
        Self::from_arc(Arc::new(widget))
    }

    /// Create a new descriptor around a shared widget.
    pub fn from_arc(widget: Arc<dyn Widget>) -> Self {
        Self {
            widget,
            delay_ms: 0,
            max_age_secs: 0,
            show_full_animation: false,
        }
    }

    /// Set the per-frame delay in milliseconds.
    pub fn with_delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the max-age in seconds.
    pub fn with_max_age_secs(mut self, max_age_secs: u32) -> Self {
        self.max_age_secs = max_age_secs;
        self
    }

    /// Set the full-animation request flag.
    pub fn with_show_full_animation(mut self, show: bool) -> Self {
        self.show_full_animation = show;
        self
    }
}

/// Timing fields of a built [`crate::Screens`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ResolvedTiming {
    /// Delay applied to every output frame, in milliseconds.
    pub delay_ms: u32,
    /// Cache lifetime hint in seconds.
    pub max_age_secs: u32,
    /// Full-animation request of the first descriptor.
    pub show_full_animation: bool,
}

/// Resolve the timeline's timing from its descriptors.
///
/// Only the first descriptor's timing governs; later descriptors contribute visuals only. An unset
/// delay on the first descriptor resolves to [`DEFAULT_DELAY_MS`]. With no descriptors every
/// field keeps its zero value.
pub fn resolve_timing(descriptors: &[FrameDescriptor]) -> ResolvedTiming {
    let Some(first) = descriptors.first() else {
        return ResolvedTiming::default();
    };
    ResolvedTiming {
        delay_ms: if first.delay_ms == 0 {
            DEFAULT_DELAY_MS
        } else {
            first.delay_ms
        },
        max_age_secs: first.max_age_secs,
        show_full_animation: first.show_full_animation,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/screens/descriptor.rs"]
mod tests;
