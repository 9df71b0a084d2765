//! Builder for configuring and constructing a `Scope`.

use crate::core::{Mode, Scope, ScopeConfig, Viewport};
use crate::Result;

#[cfg(feature = "live")]
use crate::live::{spawn_live_scope, HeapProd, ScopeHandle};

/// Fluent wrapper around [`ScopeConfig`].
///
/// Capacities and channel counts are clamped; the sample rate and viewport
/// are validated by [`build`](WaveScopeBuilder::build).
///
/// # Example
///
/// ```
/// use wavescope::prelude::*;
///
/// let scope = WaveScopeBuilder::default()
///     .sample_rate(48000.0)
///     .channels(2)
///     .viewport_size(1280.0, 720.0)
///     .build()?;
///
/// assert_eq!(scope.channel_count(), 2);
/// # Ok::<(), wavescope::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaveScopeBuilder {
    config: ScopeConfig,
    time_per_division: Option<f64>,
}

impl WaveScopeBuilder {
    /// Start from an existing config.
    pub fn from_config(config: ScopeConfig) -> Self {
        Self {
            config,
            time_per_division: None,
        }
    }

    /// Default: 44100 Hz
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Samples kept per channel. Default: 65536 (also the maximum)
    pub fn buffer_size(mut self, samples: usize) -> Self {
        self.config.buffer_size = samples;
        self
    }

    /// Default: 4 (also the maximum)
    pub fn channels(mut self, count: usize) -> Self {
        self.config.channels = count;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.config.viewport = viewport;
        self
    }

    /// Canvas size in pixels. Default: 640x480
    pub fn viewport_size(mut self, width: f64, height: f64) -> Self {
        self.config.viewport.width = width;
        self.config.viewport.height = height;
        self
    }

    /// Horizontal scale in milliseconds per division, resolved against the
    /// final sample rate.
    pub fn time_per_division(mut self, ms: f64) -> Self {
        self.time_per_division = Some(ms);
        self
    }

    /// Vertical scale in sample value per division. Default: 0.1
    pub fn volume_per_division(mut self, value: f64) -> Self {
        self.config.viewport.value_per_division = value;
        self
    }

    /// Show the input's autocorrelation in a comparison channel.
    pub fn autocorrelation_channel(mut self, channel: usize) -> Self {
        self.config.autocorrelation_channel = Some(channel);
        self
    }

    /// Resolved configuration.
    pub fn config(&self) -> ScopeConfig {
        let mut config = self.config.clone();
        if let Some(ms) = self.time_per_division {
            config.viewport.samples_per_division = config.samples_per_division(ms);
        }
        config
    }

    pub fn build(self) -> Result<Scope> {
        Ok(Scope::new(self.config())?)
    }

    /// Build the scope and move it onto a live scope thread.
    ///
    /// `ring_capacity` is the size of the sample ring between the audio
    /// callback and the scope thread; `block_size` is the number of samples
    /// fed per update.
    #[cfg(feature = "live")]
    pub fn build_live(
        self,
        ring_capacity: usize,
        block_size: usize,
    ) -> Result<(HeapProd<f32>, ScopeHandle)> {
        let scope = self.build()?;
        Ok(spawn_live_scope(scope, ring_capacity, block_size)?)
    }
}
