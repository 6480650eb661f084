use super::*;
use crate::foundation::core::Rgba8;

fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([200, 100, 50, 128]));
    let still = Still::decode(&png_bytes(&img)).unwrap();
    assert_eq!(still.size(), (2, 1));
    assert_eq!(
        still.paint(0).unwrap().pixel(1, 0),
        Some(Rgba8::new(200, 100, 50, 128))
    );
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(Still::decode(b"not an image").is_err());
}
