//! Deterministic content fingerprints.

/// Screen timeline fingerprinting.
pub mod fingerprint;
