//! Period estimation using normalized autocorrelation
//!
//! Estimates the fundamental period of a single block of audio, in samples,
//! for tuning the display of periodic waveforms.
//!
//! ## Algorithm
//!
//! 1. **Autocorrelation** - r(τ) = Σ x[i]·x[i+τ] for τ in 0..3n/4
//! 2. **Normalization** - r'(τ) = r(τ) / r(0)
//! 3. **Peak picking** - strict local maxima above 0.3·(n-τ)/n, a threshold
//!    that decays with the overlap of the two windows
//! 4. **Parabolic interpolation** - sub-sample peak positions
//! 5. **Consistency check** - peak spacing must stay within ±5% of its mean
//!
//! The mean peak spacing is the period. Blocks whose peak spacing is not
//! stable (noise, inharmonic material, silence) produce no estimate.
//!
//! ## Performance
//!
//! O(n²) in the block length. Blocks delivered by audio callbacks are small
//! (a few thousand samples), which keeps this well inside a frame budget.

use serde::{Deserialize, Serialize};

/// Minimum normalized correlation for a lag to count as a peak, before the
/// overlap compensation is applied.
pub const PEAK_THRESHOLD: f64 = 0.3;

/// Maximum relative deviation of any peak spacing from the mean spacing.
pub const MAX_PERIOD_DEVIATION: f64 = 0.05;

/// Fraction of the block searched for lags.
const LAG_NUMERATOR: usize = 3;
const LAG_DENOMINATOR: usize = 4;

/// Period state of a channel: the last reliable period plus whether the most
/// recent block confirmed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodEstimate {
    /// Period in samples. Always > 0.
    pub period: f64,
    /// Whether the latest block produced a reliable estimate.
    pub confident: bool,
}

impl Default for PeriodEstimate {
    fn default() -> Self {
        Self {
            period: 1.0,
            confident: false,
        }
    }
}

impl PeriodEstimate {
    /// The period, only when it can be trusted.
    pub fn confident_period(&self) -> Option<f64> {
        self.confident.then_some(self.period)
    }

    /// Frequency in Hz, only when the period can be trusted.
    pub fn frequency(&self, sample_rate: f64) -> Option<f64> {
        self.confident_period().map(|period| sample_rate / period)
    }
}

/// Number of lags examined for a block of `n` samples.
pub fn lag_count(n: usize) -> usize {
    n * LAG_NUMERATOR / LAG_DENOMINATOR
}

/// Estimate the period of `data` in samples.
///
/// Returns `None` when no peak is found or the peak spacing is inconsistent.
pub fn estimate_period(data: &[f32]) -> Option<f64> {
    estimate_period_into(data, &mut [])
}

/// Estimate the period of `data`, writing the normalized autocorrelation of
/// each lag into `sink` as it is computed.
///
/// Lags beyond `sink.len()` are computed but not stored, so an empty sink
/// simply disables the output.
pub fn estimate_period_into(data: &[f32], sink: &mut [f32]) -> Option<f64> {
    let n = data.len();
    let lags = lag_count(n);

    let mut tracker = PeakSpacing::default();

    // Sliding window of normalized correlation: (k-2, k-1, k)
    let mut corr_1 = 0.0f64;
    let mut corr_2 = 0.0f64;
    let mut corr_3 = 0.0f64;
    let mut normalization = 0.0f64;

    for k in 0..lags {
        corr_1 = corr_2;
        corr_2 = corr_3;

        let corr = autocorrelation(data, k);
        if k == 0 {
            normalization = corr;
        }

        corr_3 = if normalization != 0.0 {
            corr / normalization
        } else {
            0.0
        };

        if let Some(slot) = sink.get_mut(k) {
            *slot = corr_3 as f32;
        }

        let threshold = PEAK_THRESHOLD * (n - k) as f64 / n as f64;
        if k > 1 && corr_2 > threshold && corr_2 > corr_1 && corr_2 > corr_3 {
            let peak = (k - 1) as f64 + parabolic_offset(corr_1, corr_2, corr_3);
            tracker.push(peak);
        }
    }

    tracker.period()
}

/// Unnormalized autocorrelation of `data` at `lag`.
fn autocorrelation(data: &[f32], lag: usize) -> f64 {
    data.iter()
        .zip(&data[lag..])
        .map(|(&a, &b)| a as f64 * b as f64)
        .sum()
}

/// Vertex offset of the parabola through (-1, left), (0, mid), (1, right).
fn parabolic_offset(left: f64, mid: f64, right: f64) -> f64 {
    let denominator = 2.0 * (left - 2.0 * mid + right);
    if denominator.abs() > f64::EPSILON {
        (left - right) / denominator
    } else {
        0.0
    }
}

/// Running statistics over the spacing between consecutive peaks.
#[derive(Debug)]
struct PeakSpacing {
    previous: f64,
    sum: f64,
    count: usize,
    min: f64,
    max: f64,
}

impl Default for PeakSpacing {
    fn default() -> Self {
        Self {
            previous: 0.0,
            sum: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl PeakSpacing {
    fn push(&mut self, peak: f64) {
        let distance = peak - self.previous;
        self.min = self.min.min(distance);
        self.max = self.max.max(distance);
        self.sum += distance;
        self.count += 1;
        self.previous = peak;
    }

    fn period(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }

        let mean = self.sum / self.count as f64;
        if !mean.is_finite() || mean <= 0.0 {
            return None;
        }

        if self.min / mean < 1.0 - MAX_PERIOD_DEVIATION
            || self.max / mean > 1.0 + MAX_PERIOD_DEVIATION
        {
            return None;
        }

        Some(mean)
    }
}

/// Convert frequency to MIDI note and cents offset
pub fn freq_to_midi(freq: f64) -> (u8, f64) {
    if freq <= 0.0 || !freq.is_finite() {
        return (0, 0.0);
    }

    // MIDI note = 69 + 12 * log2(freq / 440)
    let note_float = 69.0 + 12.0 * (freq / 440.0).log2();
    let note = (note_float.round() as i32).clamp(0, 127) as u8;

    let cents = 1200.0 * (freq / midi_to_freq(note)).log2();

    (note, cents)
}

/// Convert MIDI note to frequency
pub fn midi_to_freq(note: u8) -> f64 {
    440.0 * 2.0f64.powf((note as f64 - 69.0) / 12.0)
}
