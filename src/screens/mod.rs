//! Frame timeline construction, lazy materialization and duration clipping.

/// The [`Screens`](aggregate::Screens) aggregate.
pub mod aggregate;
/// Frame descriptors and timing resolution.
pub mod descriptor;
/// Frame painting.
pub mod paint;
/// Timed frames and duration truncation.
pub mod timeline;
