use super::*;
use crate::foundation::core::Rgba8;

fn bitmaps(n: usize) -> Vec<Bitmap> {
    (0..n)
        .map(|i| Bitmap::filled(1, 1, Rgba8::opaque(i as u8, 0, 0)).unwrap())
        .collect()
}

fn timeline(bitmaps: &[Bitmap], delay_ms: u32) -> Vec<TimedFrame<'_>> {
    bitmaps
        .iter()
        .map(|bitmap| TimedFrame { bitmap, delay_ms })
        .collect()
}

fn delays(frames: &[TimedFrame<'_>]) -> Vec<u32> {
    frames.iter().map(|f| f.delay_ms).collect()
}

#[test]
fn budget_on_frame_boundary_keeps_whole_frames() {
    let b = bitmaps(100);
    let t = timeline(&b, 500);
    assert_eq!(total_duration_ms(&t), 50_000);
    assert_eq!(delays(&truncate(&t, 3000)), vec![500; 6]);
}

#[test]
fn budget_mid_frame_clips_last_delay() {
    let b = bitmaps(100);
    let t = timeline(&b, 500);
    assert_eq!(
        delays(&truncate(&t, 2200)),
        vec![500, 500, 500, 500, 200]
    );
}

#[test]
fn budget_below_first_delay_keeps_one_clipped_frame() {
    let b = bitmaps(100);
    let t = timeline(&b, 500);
    let out = truncate(&t, 100);
    assert_eq!(delays(&out), vec![100]);
    assert_eq!(out[0].bitmap, &b[0]);

    assert_eq!(delays(&truncate(&t, 1)), vec![1]);
}

#[test]
fn generous_and_unlimited_budgets_are_identity() {
    let b = bitmaps(100);
    let t = timeline(&b, 500);
    assert_eq!(truncate(&t, 60_000), t);
    assert_eq!(truncate(&t, 0), t);
}

#[test]
fn exact_budget_drops_trailing_zero_delay_frames() {
    let b = bitmaps(3);
    let t = vec![
        TimedFrame {
            bitmap: &b[0],
            delay_ms: 100,
        },
        TimedFrame {
            bitmap: &b[1],
            delay_ms: 0,
        },
        TimedFrame {
            bitmap: &b[2],
            delay_ms: 0,
        },
    ];
    let out = truncate(&t, 100);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].bitmap, &b[0]);
}

#[test]
fn empty_timeline_stays_empty() {
    assert!(truncate(&[], 0).is_empty());
    assert!(truncate(&[], 500).is_empty());
}

#[test]
fn result_is_prefix_with_only_last_delay_reduced() {
    let b = bitmaps(7);
    let t: Vec<_> = b
        .iter()
        .zip([30, 70, 10, 90, 40, 60, 20])
        .map(|(bitmap, delay_ms)| TimedFrame { bitmap, delay_ms })
        .collect();

    for budget in 1..=330 {
        let out = truncate(&t, budget);
        assert!(!out.is_empty());
        assert!(out.len() <= t.len());
        let last = out.len() - 1;
        for (i, f) in out.iter().enumerate() {
            assert_eq!(f.bitmap, t[i].bitmap);
            if i < last {
                assert_eq!(f.delay_ms, t[i].delay_ms);
            } else {
                assert!(f.delay_ms <= t[i].delay_ms);
            }
        }
        assert_eq!(total_duration_ms(&out), u64::from(budget).min(320));
    }
}
