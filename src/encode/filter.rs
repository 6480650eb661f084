use crate::foundation::core::Bitmap;
use crate::foundation::error::{ReelError, ReelResult};

/// Per-frame transform applied to the clipped timeline right before encoding.
///
/// Filters never touch the memoized bitmaps or the content digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Nearest-neighbour upscale by an integer factor (must be >= 1).
    Magnify(u32),
    /// Convert to luma, keeping alpha.
    Grayscale,
}

impl Filter {
    /// Apply this filter to one bitmap.
    pub fn apply(self, bitmap: &Bitmap) -> ReelResult<Bitmap> {
        match self {
            Filter::Magnify(0) => Err(ReelError::validation("magnify factor must be >= 1")),
            Filter::Magnify(1) => Ok(bitmap.clone()),
            Filter::Magnify(factor) => {
                let (w, h) = bitmap.size();
                let (Some(nw), Some(nh)) = (w.checked_mul(factor), h.checked_mul(factor)) else {
                    return Err(ReelError::validation(format!(
                        "magnify x{factor} overflows {w}x{h}"
                    )));
                };
                let img = bitmap.to_rgba_image()?;
                let scaled =
                    image::imageops::resize(&img, nw, nh, image::imageops::FilterType::Nearest);
                Ok(Bitmap::from_rgba_image(scaled))
            }
            Filter::Grayscale => {
                let img = bitmap.to_rgba_image()?;
                let gray = image::DynamicImage::ImageRgba8(img).grayscale();
                Ok(Bitmap::from_rgba_image(gray.to_rgba8()))
            }
        }
    }
}

/// Run `filters` over `bitmap` in order.
pub fn apply_filters(bitmap: &Bitmap, filters: &[Filter]) -> ReelResult<Bitmap> {
    let mut out = bitmap.clone();
    for f in filters {
        out = f.apply(&out)?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/filter.rs"]
mod tests;
