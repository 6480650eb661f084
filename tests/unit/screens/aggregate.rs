use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Rgba8;
use crate::widget::Widget;
use crate::widget::fill::Fill;

/// Widget that paints a distinct color per step and counts every paint call.
#[derive(Debug, Default)]
struct Counting {
    frames: usize,
    shade: u8,
    paints: AtomicUsize,
}

impl Counting {
    fn new(frames: usize, shade: u8) -> Arc<Self> {
        Arc::new(Self {
            frames,
            shade,
            paints: AtomicUsize::new(0),
        })
    }

    fn paints(&self) -> usize {
        self.paints.load(Ordering::SeqCst)
    }
}

impl Widget for Counting {
    fn size(&self) -> (u32, u32) {
        (3, 2)
    }

    fn frame_count(&self) -> usize {
        self.frames
    }

    fn paint(&self, frame: usize) -> ReelResult<Bitmap> {
        self.paints.fetch_add(1, Ordering::SeqCst);
        Bitmap::filled(3, 2, Rgba8::opaque(frame as u8, self.shade, 0))
    }
}

#[derive(Debug)]
struct Broken;

impl Widget for Broken {
    fn size(&self) -> (u32, u32) {
        (1, 1)
    }

    fn paint(&self, _frame: usize) -> ReelResult<Bitmap> {
        Err(ReelError::render("font missing"))
    }
}

fn fill(v: u8) -> FrameDescriptor {
    FrameDescriptor::new(Fill::new(2, 2, Rgba8::opaque(v, v, v)))
}

#[test]
fn from_roots_copies_descriptors_and_resolves_timing() {
    let s = Screens::from_roots(&[fill(0), fill(1)]);
    assert_eq!(s.roots().len(), 2);
    assert!(!s.is_materialized());
    assert_eq!(s.delay_ms(), 50);
    assert_eq!(s.max_age_secs(), 0);

    let s = Screens::from_roots(&[
        fill(0).with_delay_ms(4711).with_max_age_secs(42),
        fill(1).with_delay_ms(31415).with_max_age_secs(926535),
    ]);
    assert_eq!(s.roots().len(), 2);
    assert_eq!(s.delay_ms(), 4711);
    assert_eq!(s.max_age_secs(), 42);
}

#[test]
fn mutating_the_callers_descriptors_does_not_affect_built_screens() {
    let mut roots = vec![fill(0).with_delay_ms(100)];
    let s = Screens::from_roots(&roots);
    let before = s.hash().unwrap();
    roots[0].delay_ms = 900;
    roots[0].widget = Arc::new(Fill::new(2, 2, Rgba8::opaque(9, 9, 9)));
    assert_eq!(s.delay_ms(), 100);
    assert_eq!(s.hash().unwrap(), before);
}

#[test]
fn show_full_animation_comes_from_first_root() {
    let s = Screens::from_roots(&[fill(0).with_show_full_animation(true), fill(1)]);
    assert!(s.show_full_animation());
    let s = Screens::from_roots(&[fill(0), fill(1).with_show_full_animation(true)]);
    assert!(!s.show_full_animation());
}

#[test]
fn frame_count_follows_root_multiplicity() {
    let anim = Counting::new(5, 0);
    let one = Screens::from_roots(&[FrameDescriptor::from_arc(anim.clone())]);
    assert_eq!(one.frame_count(), 5);
    assert_eq!(one.bitmaps().unwrap().len(), 5);

    let many = Screens::from_roots(&[
        FrameDescriptor::from_arc(anim.clone()),
        FrameDescriptor::from_arc(anim.clone()),
    ]);
    assert_eq!(many.frame_count(), 2);
    let images = many.bitmaps().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].pixel(0, 0), Some(Rgba8::opaque(0, 0, 0)));
}

#[test]
fn empty_screens_hash_is_stable_and_encodes_to_nothing() {
    let s = Screens::from_roots(&[]);
    assert!(s.is_empty());
    assert_eq!(s.frame_count(), 0);
    assert_eq!(s.timing(), ResolvedTiming::default());
    let h = s.hash().unwrap();
    assert!(!h.as_bytes().is_empty());
    for _ in 0..20 {
        assert_eq!(Screens::from_roots(&[]).hash().unwrap(), h);
    }
    assert!(s.encode_gif(0).unwrap().is_empty());
    assert!(s.encode_webp(1000).unwrap().is_empty());
}

#[test]
fn hash_tracks_pixels_delay_and_max_age() {
    let base = || fill(7);
    let h1 = Screens::from_roots(&[base()]).hash().unwrap();
    let h2 = Screens::from_roots(&[base().with_max_age_secs(12)])
        .hash()
        .unwrap();
    let h3 = Screens::from_roots(&[base().with_max_age_secs(12).with_delay_ms(1)])
        .hash()
        .unwrap();
    let h4 = Screens::from_roots(&[fill(8)]).hash().unwrap();
    assert_ne!(h1, h2);
    assert_ne!(h2, h3);
    assert_ne!(h1, h4);

    let h5 = Screens::from_roots(&[base().with_show_full_animation(true)])
        .hash()
        .unwrap();
    assert_eq!(h1, h5);
}

#[test]
fn frames_are_painted_once_across_hash_and_encodes() {
    let anim = Counting::new(4, 0);
    let s = Screens::from_roots(&[FrameDescriptor::from_arc(anim.clone())]);
    assert_eq!(anim.paints(), 0);

    let h = s.hash().unwrap();
    assert_eq!(anim.paints(), 4);
    s.encode_gif(0).unwrap();
    s.encode_webp(120).unwrap();
    assert_eq!(s.hash().unwrap(), h);
    assert_eq!(anim.paints(), 4);
    assert!(s.is_materialized());
}

#[test]
fn concurrent_first_use_paints_each_frame_once() {
    let anim = Counting::new(16, 3);
    let s = Screens::from_roots(&[FrameDescriptor::from_arc(anim.clone())]).with_paint_opts(
        PaintOpts {
            parallel: true,
            threads: Some(2),
        },
    );

    let digests: Vec<Digest> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let s = &s;
                scope.spawn(move || {
                    if i % 2 == 0 {
                        s.encode_gif(200).unwrap();
                    }
                    s.hash().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(anim.paints(), 16);
    assert!(digests.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn paint_failure_propagates_and_is_retried() {
    let s = Screens::from_roots(&[FrameDescriptor::new(Broken)]);
    let err = s.hash().unwrap_err();
    assert!(err.to_string().contains("font missing"));
    assert!(!s.is_materialized());
    assert!(s.encode_gif(0).is_err());
    assert!(s.encode_webp(0).is_err());
}

#[test]
fn from_bitmaps_is_materialized_up_front() {
    let frames = vec![
        Bitmap::filled(2, 2, Rgba8::opaque(1, 0, 0)).unwrap(),
        Bitmap::filled(2, 2, Rgba8::opaque(2, 0, 0)).unwrap(),
    ];
    let s = Screens::from_bitmaps(frames.clone(), 0);
    assert!(!s.is_empty());
    assert!(s.is_materialized());
    assert_eq!(s.frame_count(), 2);
    assert_eq!(s.delay_ms(), 50);
    assert_eq!(*s.bitmaps().unwrap(), frames);
    assert!(s.roots().is_empty());

    assert!(Screens::from_bitmaps(Vec::new(), 100).is_empty());
}

#[test]
fn encode_with_clips_then_filters() {
    let anim = Counting::new(10, 0);
    let s = Screens::from_roots(&[FrameDescriptor::from_arc(anim).with_delay_ms(500)]);
    let mut sink = InMemorySink::new();
    s.encode_with(&mut sink, 1200, &[Filter::Magnify(2)]).unwrap();
    assert_eq!(sink.delays(), vec![500, 500, 200]);
    assert!(sink.frames().iter().all(|(b, _)| b.size() == (6, 4)));

    let raw = s.bitmaps().unwrap();
    assert!(raw.iter().all(|b| b.size() == (3, 2)));
}

#[test]
fn zero_area_frames_fail_to_encode_but_still_hash() {
    let s = Screens::from_roots(&[FrameDescriptor::new(Fill::new(0, 4, Rgba8::transparent()))]);
    assert!(s.hash().is_ok());
    assert!(matches!(
        s.encode_gif(0).unwrap_err(),
        ReelError::Validation(_)
    ));
    assert!(matches!(
        s.encode_webp(0).unwrap_err(),
        ReelError::Validation(_)
    ));
}
