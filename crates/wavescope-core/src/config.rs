//! Oscilloscope configuration.

use crate::channel::MAX_CAPACITY;
use crate::focus::Mode;
use crate::view::Viewport;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of traces a scope can hold (one input plus comparison slots).
pub const MAX_CHANNELS: usize = 4;

/// Configuration for a [`Scope`](crate::Scope).
///
/// Capacities and channel counts are clamped when the scope is built;
/// `sample_rate` and the viewport must be valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub sample_rate: f64,
    /// Samples kept per channel (clamped to 0..=65536)
    pub buffer_size: usize,
    /// Number of traces (clamped to 1..=4)
    pub channels: usize,
    pub viewport: Viewport,
    pub mode: Mode,
    /// Channel that displays the input's autocorrelation, if any
    pub autocorrelation_channel: Option<usize>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            buffer_size: MAX_CAPACITY,
            channels: MAX_CHANNELS,
            viewport: Viewport::default(),
            mode: Mode::Stream,
            autocorrelation_channel: None,
        }
    }
}

impl ScopeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate < 8000.0 || self.sample_rate > 384000.0
        {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }

        self.viewport.validate()?;

        if let Some(index) = self.autocorrelation_channel {
            let count = self.channel_count();
            if index == 0 || index >= count {
                return Err(Error::InvalidConfig(format!(
                    "autocorrelation channel {index} must be a comparison channel (1..{count})"
                )));
            }
        }

        Ok(())
    }

    /// Buffer size after clamping.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_size.min(MAX_CAPACITY)
    }

    /// Channel count after clamping.
    pub fn channel_count(&self) -> usize {
        self.channels.clamp(1, MAX_CHANNELS)
    }

    /// Samples per division for a time scale in milliseconds per division.
    pub fn samples_per_division(&self, ms_per_division: f64) -> f64 {
        ms_per_division / 1000.0 * self.sample_rate
    }
}
