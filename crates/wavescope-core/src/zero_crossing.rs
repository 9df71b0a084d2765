//! Zero-crossing search over a sample window.
//!
//! Used to lock the phase of a periodic waveform so it does not drift
//! horizontally from one frame to the next.

/// Find the zero crossing nearest to `index`, with sub-sample precision.
///
/// `index` is rounded and clamped into the buffer first. Pairs of
/// neighbouring samples are then examined at increasing distance, the pair
/// before the index ahead of the pair after it, and the first pair whose
/// product is `<= 0` wins. The crossing is
/// linearly interpolated between the two samples.
///
/// Returns `index` unchanged when the buffer holds no crossing.
pub fn find_nearest_zero_crossing(buffer: &[f32], index: f64) -> f64 {
    if !index.is_finite() || buffer.len() < 2 {
        return index;
    }

    let len = buffer.len() as isize;
    let i = (index.round() as isize).clamp(0, len - 1);

    for j in 0..len {
        // Pair ending at i - j
        if let Some(crossing) = crossing_at(buffer, i - j - 1) {
            return crossing;
        }
        // Pair starting at i + j
        if let Some(crossing) = crossing_at(buffer, i + j) {
            return crossing;
        }
    }

    index
}

/// Find the last rising edge (`<= 0` followed by `> 0`) at or before `index`.
///
/// Returns the index of the first positive sample, without interpolation.
/// Returns `index` unchanged when no rising edge exists.
pub fn find_zero_crossing_before(buffer: &[f32], index: usize) -> usize {
    if buffer.is_empty() {
        return index;
    }

    let start = index.min(buffer.len() - 1);
    (1..=start)
        .rev()
        .find(|&j| buffer[j - 1] <= 0.0 && buffer[j] > 0.0)
        .unwrap_or(index)
}

/// Interpolated crossing between `buffer[first]` and `buffer[first + 1]`, if
/// both are in bounds and they straddle (or touch) zero.
#[inline]
fn crossing_at(buffer: &[f32], first: isize) -> Option<f64> {
    if first < 0 {
        return None;
    }
    let first = first as usize;
    let (&a, &b) = (buffer.get(first)?, buffer.get(first + 1)?);

    if (a as f64) * (b as f64) > 0.0 {
        return None;
    }

    let (a, b) = (a as f64, b as f64);
    let fraction = if a != b { a / (a - b) } else { 0.0 };
    Some(first as f64 + fraction)
}
