use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Bitmap;
use crate::foundation::error::ReelResult;
use crate::widget::{Widget, check_frame_index};

/// A single prepared bitmap.
#[derive(Clone, Debug)]
pub struct Still {
    bitmap: Arc<Bitmap>,
}

impl Still {
    /// Create a new [`Still`] from a painted bitmap.
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            bitmap: Arc::new(bitmap),
        }
    }

    /// Decode encoded image bytes (PNG, JPEG, GIF first frame, ...) into straight RGBA8.
    pub fn decode(bytes: &[u8]) -> ReelResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::new(Bitmap::from_rgba_image(dyn_img.to_rgba8())))
    }

    /// Borrow the prepared bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
}

impl Widget for Still {
    fn size(&self) -> (u32, u32) {
        self.bitmap.size()
    }

    fn paint(&self, frame: usize) -> ReelResult<Bitmap> {
        check_frame_index(frame, 1)?;
        Ok(Bitmap::clone(&self.bitmap))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/still.rs"]
mod tests;
