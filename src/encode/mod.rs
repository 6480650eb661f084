//! Format adapters.
//!
//! Adapters consume an already-clipped `(bitmap, delay)` sequence in order and produce one
//! animated image. They never re-derive timing; each only converts milliseconds into its own
//! native time unit.

/// Per-frame filters applied before encoding.
pub mod filter;
/// Animated GIF adapter.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
/// Animated WebP adapter.
pub mod webp;
