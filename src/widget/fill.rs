use crate::foundation::core::{Bitmap, Rgba8};
use crate::foundation::error::ReelResult;
use crate::widget::{Widget, check_frame_index};

/// Static solid-color box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fill {
    /// Box width in pixels.
    pub width: u32,
    /// Box height in pixels.
    pub height: u32,
    /// Fill color.
    pub color: Rgba8,
}

impl Fill {
    /// Create a new [`Fill`].
    pub fn new(width: u32, height: u32, color: Rgba8) -> Self {
        Self {
            width,
            height,
            color,
        }
    }
}

impl Widget for Fill {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn paint(&self, frame: usize) -> ReelResult<Bitmap> {
        check_frame_index(frame, 1)?;
        Bitmap::filled(self.width, self.height, self.color)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/fill.rs"]
mod tests;
