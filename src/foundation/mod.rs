/// Core value types (bitmaps, colors).
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
