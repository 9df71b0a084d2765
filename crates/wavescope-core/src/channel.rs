//! Rolling sample window for one display trace.

use crate::period::{estimate_period_into, PeriodEstimate};
use crate::zero_crossing::find_nearest_zero_crossing;

/// Largest buffer a channel will allocate, in samples.
pub const MAX_CAPACITY: usize = 65536;

/// Rolling sample window plus the analysis state derived from it.
///
/// The buffer is a fixed-length window over an unbounded stream: every
/// [`feed`](Channel::feed) shifts the window left and appends the new block at
/// the end. The focus is an offset into the window that tracks a fixed point
/// in stream time, so it moves left by the length of every fed block.
#[derive(Debug, Clone)]
pub struct Channel {
    buffer: Vec<f32>,
    focus: f64,
    estimate: PeriodEstimate,
    visible: bool,
}

impl Channel {
    /// Create a zero-filled channel. `capacity` is clamped to
    /// `0..=MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_CAPACITY);
        Self {
            buffer: vec![0.0; capacity],
            focus: capacity as f64 / 2.0,
            estimate: PeriodEstimate::default(),
            visible: false,
        }
    }

    /// Append a block, discarding as many of the oldest samples, and update
    /// the period estimate.
    pub fn feed(&mut self, data: &[f32]) {
        self.feed_with_correlation(data, &mut []);
    }

    /// Like [`feed`](Channel::feed), also writing the block's normalized
    /// autocorrelation into `correlation` (one value per lag, clipped to the
    /// slice length).
    pub fn feed_with_correlation(&mut self, data: &[f32], correlation: &mut [f32]) {
        self.push_samples(data);
        self.focus -= data.len() as f64;

        match estimate_period_into(data, correlation) {
            Some(period) => {
                self.estimate = PeriodEstimate {
                    period,
                    confident: true,
                };
            }
            None => {
                // Keep the last good period for track mode
                self.estimate.confident = false;
                tracing::trace!(block = data.len(), "period estimate unreliable");
            }
        }
    }

    fn push_samples(&mut self, data: &[f32]) {
        let len = self.buffer.len();
        if data.len() >= len {
            if data.len() > len {
                tracing::warn!(
                    block = data.len(),
                    capacity = len,
                    "block larger than channel buffer, keeping the newest samples"
                );
            }
            self.buffer.copy_from_slice(&data[data.len() - len..]);
            return;
        }

        let m = data.len();
        self.buffer.copy_within(m.., 0);
        self.buffer[len - m..].copy_from_slice(data);
    }

    /// Snap the focus to the nearest zero crossing.
    pub fn snap_focus_to_zero_crossing(&mut self) {
        self.focus = find_nearest_zero_crossing(&self.buffer, self.focus);
    }

    /// Zero the buffer. Focus and period state are left alone.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
    }

    /// Zero the buffer and return focus and period state to their initial
    /// values.
    pub fn reset(&mut self) {
        self.clear();
        self.focus = self.buffer.len() as f64 / 2.0;
        self.estimate = PeriodEstimate::default();
    }

    /// Copy samples, focus and period state from `other`.
    ///
    /// When capacities differ, the newest samples of `other` are aligned with
    /// the end of this buffer and anything left over is zeroed.
    pub fn copy_from(&mut self, other: &Channel) {
        let len = self.buffer.len();
        let src = &other.buffer[other.buffer.len().saturating_sub(len)..];
        let pad = len - src.len();
        self.buffer[..pad].fill(0.0);
        self.buffer[pad..].copy_from_slice(src);

        self.focus = other.focus + pad as f64 - (other.buffer.len() - src.len()) as f64;
        self.estimate = other.estimate;
    }

    /// Current sample window, oldest to newest.
    pub fn samples(&self) -> &[f32] {
        &self.buffer
    }

    /// Mutable access for views that write derived data (autocorrelation).
    pub(crate) fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn focus(&self) -> f64 {
        self.focus
    }

    pub fn set_focus(&mut self, focus: f64) {
        self.focus = focus;
    }

    /// Last reliable period in samples. Retained across unreliable blocks.
    pub fn estimated_period(&self) -> f64 {
        self.estimate.period
    }

    /// Whether the most recent block confirmed the period.
    pub fn is_period_confident(&self) -> bool {
        self.estimate.confident
    }

    pub fn period_estimate(&self) -> PeriodEstimate {
        self.estimate
    }

    pub fn confident_period(&self) -> Option<f64> {
        self.estimate.confident_period()
    }

    /// Estimated frequency in Hz, only when the period is confident.
    pub fn frequency(&self, sample_rate: f64) -> Option<f64> {
        self.estimate.frequency(sample_rate)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
