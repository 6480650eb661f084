use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::Bitmap;

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// Opaque 128-bit content fingerprint. Only equality is meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; 16]);

impl Digest {
    /// Digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex encoding of the digest.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Fingerprint painted frames together with the timing that governs playback.
///
/// Frames are hashed in order with their dimensions, so reordering frames or reshaping the same
/// bytes changes the digest. An empty frame list still yields a well-defined digest.
pub fn fingerprint_frames(frames: &[Bitmap], delay_ms: u32, max_age_secs: u32) -> Digest {
    let mut h = StableHasher::new();
    h.write_u64(frames.len() as u64);
    for b in frames {
        h.write_u32(b.width());
        h.write_u32(b.height());
        h.write_bytes(b.data());
    }
    h.write_u32(delay_ms);
    h.write_u32(max_age_secs);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn finish(self) -> Digest {
        Digest(self.inner.digest128().to_be_bytes())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hash/fingerprint.rs"]
mod tests;
