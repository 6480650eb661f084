use crate::foundation::core::Bitmap;

/// One materialized frame and how long it stays on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedFrame<'a> {
    /// Painted frame.
    pub bitmap: &'a Bitmap,
    /// Display time in milliseconds.
    pub delay_ms: u32,
}

/// Sum of all delays in milliseconds.
pub fn total_duration_ms(timeline: &[TimedFrame<'_>]) -> u64 {
    timeline.iter().map(|f| u64::from(f.delay_ms)).sum()
}

/// Clip `timeline` to at most `max_duration_ms` of playback.
///
/// `max_duration_ms == 0` means unlimited. Otherwise the result is the longest prefix whose
/// cumulative duration stays within the budget, where the first frame that would overshoot is kept
/// with its delay reduced to the remaining time. Iteration stops as soon as the budget is met
/// exactly, so trailing frames are dropped even if they have zero delay.
///
/// The same clipped sequence feeds every format adapter; any timing difference between outputs
/// comes from format quantization alone.
pub fn truncate<'a>(timeline: &[TimedFrame<'a>], max_duration_ms: u32) -> Vec<TimedFrame<'a>> {
    if max_duration_ms == 0 {
        return timeline.to_vec();
    }

    let budget = u64::from(max_duration_ms);
    let mut elapsed = 0u64;
    let mut out = Vec::new();
    for frame in timeline {
        let d = u64::from(frame.delay_ms);
        if elapsed + d > budget {
            // `elapsed < budget` holds here, so the remainder is non-zero and fits in u32.
            out.push(TimedFrame {
                bitmap: frame.bitmap,
                delay_ms: (budget - elapsed) as u32,
            });
            break;
        }
        out.push(*frame);
        elapsed += d;
        if elapsed == budget {
            break;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/screens/timeline.rs"]
mod tests;
