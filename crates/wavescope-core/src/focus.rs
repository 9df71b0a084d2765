//! Focus tracking: which part of a channel's window the display shows.
//!
//! Three modes, switched only by the user:
//! - **Stream** - always show the newest samples
//! - **Track** - scroll in whole periods and lock onto a zero crossing
//! - **Trigger** - only update when the input is loud enough

use crate::channel::Channel;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amplitude a block must exceed for trigger mode to accept it.
pub const TRIGGER_THRESHOLD: f32 = 0.1;

/// Focus tracking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Stream,
    Track,
    Trigger,
}

/// Whether a block made it into the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    Fed,
    /// Trigger mode rejected a quiet block; buffer and focus are untouched.
    Frozen,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Stream, Mode::Track, Mode::Trigger];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Stream => "stream",
            Mode::Track => "track",
            Mode::Trigger => "trigger",
        }
    }

    /// Feed `data` to `channel` and move its focus according to this mode.
    pub fn feed(self, channel: &mut Channel, data: &[f32], max_visible_len: usize) -> FeedOutcome {
        self.feed_with_correlation(channel, data, max_visible_len, &mut [])
    }

    /// Like [`feed`](Mode::feed), forwarding the block's autocorrelation into
    /// `correlation` when the block is accepted.
    pub fn feed_with_correlation(
        self,
        channel: &mut Channel,
        data: &[f32],
        max_visible_len: usize,
        correlation: &mut [f32],
    ) -> FeedOutcome {
        match self {
            Mode::Stream => {
                channel.feed_with_correlation(data, correlation);
                follow_stream(channel, max_visible_len);
                FeedOutcome::Fed
            }
            Mode::Track => {
                channel.feed_with_correlation(data, correlation);
                follow_period(channel, max_visible_len);
                FeedOutcome::Fed
            }
            Mode::Trigger => {
                if !is_triggered(data) {
                    return FeedOutcome::Frozen;
                }
                channel.feed_with_correlation(data, correlation);
                follow_trigger(channel, max_visible_len);
                FeedOutcome::Fed
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidConfig(format!("unknown mode '{s}'")))
    }
}

/// Focus that right-aligns the newest samples with half a screen of margin.
fn stream_target(channel: &Channel, max_visible_len: usize) -> f64 {
    channel.len() as f64 - max_visible_len as f64 / 2.0
}

/// Stream: always show the most recent samples.
pub fn follow_stream(channel: &mut Channel, max_visible_len: usize) {
    let target = stream_target(channel, max_visible_len);
    channel.set_focus(target);
}

/// Track: advance the focus by the largest whole number of periods that keeps
/// it within one period of the stream target, then lock onto the nearest zero
/// crossing.
///
/// Uses the last reliable period, so an unreliable block does not make the
/// view jump.
pub fn follow_period(channel: &mut Channel, max_visible_len: usize) {
    let target = stream_target(channel, max_visible_len);
    let period = channel.estimated_period();
    let focus = channel.focus();

    let periods = ((target - focus) / period).floor();
    if periods.is_finite() {
        channel.set_focus(focus + period * periods);
    }
    channel.snap_focus_to_zero_crossing();
}

/// Trigger: align the view on the last quiet sample of the buffer.
///
/// When every sample is above the threshold the scan stops at index 0.
pub fn follow_trigger(channel: &mut Channel, max_visible_len: usize) {
    let quiet = channel
        .samples()
        .iter()
        .rposition(|sample| sample.abs() <= TRIGGER_THRESHOLD)
        .unwrap_or(0);
    channel.set_focus(quiet as f64 - max_visible_len as f64 / 2.0);
}

/// Whether any sample of the block exceeds [`TRIGGER_THRESHOLD`].
pub fn is_triggered(data: &[f32]) -> bool {
    data.iter().any(|sample| sample.abs() > TRIGGER_THRESHOLD)
}
