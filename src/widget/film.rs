use std::sync::Arc;

use crate::foundation::core::Bitmap;
use crate::foundation::error::{ReelError, ReelResult};
use crate::widget::{Widget, check_frame_index};

/// An explicit sequence of same-sized bitmaps, one per animation step.
#[derive(Clone, Debug)]
pub struct Film {
    frames: Arc<[Bitmap]>,
}

impl Film {
    /// Create a new [`Film`]; frames must be non-empty and share one size.
    pub fn new(frames: Vec<Bitmap>) -> ReelResult<Self> {
        let Some(first) = frames.first() else {
            return Err(ReelError::validation("film needs at least one frame"));
        };
        let size = first.size();
        if let Some((i, b)) = frames.iter().enumerate().find(|(_, b)| b.size() != size) {
            return Err(ReelError::validation(format!(
                "film frame {i} is {}x{}, expected {}x{}",
                b.width(),
                b.height(),
                size.0,
                size.1
            )));
        }
        Ok(Self {
            frames: frames.into(),
        })
    }
}

impl Widget for Film {
    fn size(&self) -> (u32, u32) {
        self.frames[0].size()
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn paint(&self, frame: usize) -> ReelResult<Bitmap> {
        check_frame_index(frame, self.frames.len())?;
        Ok(self.frames[frame].clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/film.rs"]
mod tests;
