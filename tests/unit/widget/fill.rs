use super::*;

#[test]
fn fill_is_static_and_sized() {
    let f = Fill::new(4, 3, Rgba8::opaque(255, 0, 0));
    assert_eq!(f.size(), (4, 3));
    assert_eq!(f.frame_count(), 1);
    let b = f.paint(0).unwrap();
    assert_eq!(b.size(), (4, 3));
    assert_eq!(b.pixel(3, 2), Some(Rgba8::opaque(255, 0, 0)));
}

#[test]
fn fill_rejects_out_of_range_frame() {
    let f = Fill::new(1, 1, Rgba8::transparent());
    let err = f.paint(1).unwrap_err();
    assert!(err.to_string().contains("render error:"));
}
