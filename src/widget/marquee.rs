use image::RgbaImage;

use crate::foundation::core::Bitmap;
use crate::foundation::error::{ReelError, ReelResult};
use crate::widget::{Widget, check_frame_index};

/// Scrolls content horizontally through a fixed-width viewport, one pixel per frame.
///
/// The animation starts with the content's left edge aligned to the viewport and ends when its
/// right edge is aligned, so content `w` pixels wide in a viewport `v` pixels wide yields
/// `w - v + 1` frames. Content that already fits is static.
#[derive(Clone, Debug)]
pub struct Marquee {
    content: RgbaImage,
    viewport_width: u32,
}

impl Marquee {
    /// Create a new [`Marquee`] over `content` with a viewport `viewport_width` pixels wide.
    pub fn new(content: &Bitmap, viewport_width: u32) -> ReelResult<Self> {
        if viewport_width == 0 {
            return Err(ReelError::validation("marquee viewport width must be > 0"));
        }
        Ok(Self {
            content: content.to_rgba_image()?,
            viewport_width,
        })
    }
}

impl Widget for Marquee {
    fn size(&self) -> (u32, u32) {
        (self.viewport_width, self.content.height())
    }

    fn frame_count(&self) -> usize {
        let w = self.content.width();
        if w > self.viewport_width {
            (w - self.viewport_width) as usize + 1
        } else {
            1
        }
    }

    fn paint(&self, frame: usize) -> ReelResult<Bitmap> {
        check_frame_index(frame, self.frame_count())?;
        let (vw, h) = self.size();
        let offset = frame as u32;
        let visible = vw.min(self.content.width() - offset);

        let mut out = RgbaImage::new(vw, h);
        let window = image::imageops::crop_imm(&self.content, offset, 0, visible, h).to_image();
        image::imageops::replace(&mut out, &window, 0, 0);
        Ok(Bitmap::from_rgba_image(out))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/marquee.rs"]
mod tests;
