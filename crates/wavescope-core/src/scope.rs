//! Multi-channel oscilloscope state.

use crate::channel::Channel;
use crate::config::ScopeConfig;
use crate::focus::{FeedOutcome, Mode};
use crate::period::PeriodEstimate;
use crate::readout::Readout;
use crate::view::{TracePoint, Viewport};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Oscilloscope engine: one input trace plus comparison traces.
///
/// Channel 0 receives every fed block; the other channels only change through
/// [`copy_channel`](Scope::copy_channel), [`clear_channel`](Scope::clear_channel)
/// or the autocorrelation view.
///
/// # Example
///
/// ```
/// use wavescope_core::{Mode, Scope, ScopeConfig};
///
/// let mut scope = Scope::new(ScopeConfig {
///     buffer_size: 8192,
///     ..Default::default()
/// })?;
/// scope.set_mode(Mode::Track);
///
/// let block: Vec<f32> = (0..2048)
///     .map(|i| (i as f32 * std::f32::consts::TAU / 100.0).sin())
///     .collect();
/// scope.feed(&block);
///
/// let input = scope.channel(0)?;
/// assert!(input.is_period_confident());
/// # Ok::<(), wavescope_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scope {
    sample_rate: f64,
    channels: Vec<Channel>,
    mode: Mode,
    viewport: Viewport,
    autocorrelation_channel: Option<usize>,
}

impl Scope {
    pub fn new(config: ScopeConfig) -> Result<Self> {
        config.validate()?;

        let capacity = config.buffer_capacity();
        let mut channels: Vec<Channel> = (0..config.channel_count())
            .map(|_| Channel::new(capacity))
            .collect();
        channels[0].set_visible(true);

        tracing::debug!(
            channels = channels.len(),
            capacity,
            sample_rate = config.sample_rate,
            "created scope"
        );

        Ok(Self {
            sample_rate: config.sample_rate,
            channels,
            mode: config.mode,
            viewport: config.viewport,
            autocorrelation_channel: config.autocorrelation_channel,
        })
    }

    /// Feed one block of input to channel 0 and update its focus.
    pub fn feed(&mut self, data: &[f32]) -> FeedOutcome {
        let max_visible_len = self.viewport.max_visible_len();
        let mode = self.mode;

        let (input, others) = self.channels.split_at_mut(1);
        let input = &mut input[0];

        let outcome = match self
            .autocorrelation_channel
            .and_then(|index| others.get_mut(index.checked_sub(1)?))
        {
            Some(view) => {
                let outcome =
                    mode.feed_with_correlation(input, data, max_visible_len, view.samples_mut());
                if outcome == FeedOutcome::Fed {
                    view.set_focus(data.len() as f64 / 2.0);
                }
                outcome
            }
            None => mode.feed(input, data, max_visible_len),
        };

        if outcome == FeedOutcome::Frozen {
            tracing::trace!(block = data.len(), "trigger not reached, display frozen");
        }
        outcome
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            tracing::debug!(from = %self.mode, to = %mode, "mode changed");
        }
        self.mode = mode;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        viewport.validate()?;
        self.viewport = viewport;
        Ok(())
    }

    /// Resize the canvas, keeping grid and scales.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.set_viewport(Viewport {
            width,
            height,
            ..self.viewport
        })
    }

    /// Horizontal scale in milliseconds per division.
    pub fn set_time_per_division(&mut self, ms: f64) -> Result<()> {
        self.set_viewport(Viewport {
            samples_per_division: ms / 1000.0 * self.sample_rate,
            ..self.viewport
        })
    }

    /// Vertical scale in sample value per division.
    pub fn set_volume_per_division(&mut self, value: f64) -> Result<()> {
        self.set_viewport(Viewport {
            value_per_division: value,
            ..self.viewport
        })
    }

    /// Horizontal scale in milliseconds per division.
    pub fn time_per_division(&self) -> f64 {
        self.viewport.samples_per_division / self.sample_rate * 1000.0
    }

    pub fn max_visible_len(&self) -> usize {
        self.viewport.max_visible_len()
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel(&self, index: usize) -> Result<&Channel> {
        self.channels.get(index).ok_or(Error::ChannelOutOfRange {
            index,
            count: self.channels.len(),
        })
    }

    fn channel_mut(&mut self, index: usize) -> Result<&mut Channel> {
        let count = self.channels.len();
        self.channels
            .get_mut(index)
            .ok_or(Error::ChannelOutOfRange { index, count })
    }

    pub fn set_channel_visible(&mut self, index: usize, visible: bool) -> Result<()> {
        self.channel_mut(index)?.set_visible(visible);
        Ok(())
    }

    /// Flip a channel's visibility, returning the new state.
    pub fn toggle_channel_visible(&mut self, index: usize) -> Result<bool> {
        let channel = self.channel_mut(index)?;
        let visible = !channel.is_visible();
        channel.set_visible(visible);
        Ok(visible)
    }

    /// Copy samples, focus and period state from one channel to another.
    ///
    /// The channels keep independent storage; later feeds to `from` do not
    /// reach `to`.
    pub fn copy_channel(&mut self, from: usize, to: usize) -> Result<()> {
        let count = self.channels.len();
        for index in [from, to] {
            if index >= count {
                return Err(Error::ChannelOutOfRange { index, count });
            }
        }

        if from < to {
            let (head, tail) = self.channels.split_at_mut(to);
            tail[0].copy_from(&head[from]);
        } else if from > to {
            let (head, tail) = self.channels.split_at_mut(from);
            head[to].copy_from(&tail[0]);
        }

        tracing::debug!(from, to, "copied channel");
        Ok(())
    }

    /// Zero a channel's samples.
    pub fn clear_channel(&mut self, index: usize) -> Result<()> {
        self.channel_mut(index)?.clear();
        tracing::debug!(channel = index, "cleared channel");
        Ok(())
    }

    /// Replace every channel with a fresh one of `capacity` samples (clamped).
    ///
    /// Visibility is kept; samples, focus and period state are reset.
    pub fn resize_buffers(&mut self, capacity: usize) {
        for channel in &mut self.channels {
            let visible = channel.is_visible();
            *channel = Channel::new(capacity);
            channel.set_visible(visible);
        }
        tracing::debug!(capacity = self.buffer_capacity(), "resized channel buffers");
    }

    pub fn buffer_capacity(&self) -> usize {
        self.channels.first().map(Channel::len).unwrap_or(0)
    }

    pub fn autocorrelation_channel(&self) -> Option<usize> {
        self.autocorrelation_channel
    }

    /// Route the input's autocorrelation into a comparison channel, or stop
    /// doing so with `None`.
    pub fn set_autocorrelation_view(&mut self, channel: Option<usize>) -> Result<()> {
        if let Some(index) = channel {
            if index == 0 {
                return Err(Error::InvalidConfig(
                    "the input channel cannot display autocorrelation".into(),
                ));
            }
            self.channel(index)?;
        }
        self.autocorrelation_channel = channel;
        Ok(())
    }

    pub fn readout(&self, index: usize) -> Result<Readout> {
        let channel = self.channel(index)?;
        Ok(Readout::from_estimate(
            channel.period_estimate(),
            self.sample_rate,
        ))
    }

    /// Readouts of the visible channels, by channel index.
    pub fn readouts(&self) -> Vec<(usize, Readout)> {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, channel)| channel.is_visible())
            .map(|(index, channel)| {
                (
                    index,
                    Readout::from_estimate(channel.period_estimate(), self.sample_rate),
                )
            })
            .collect()
    }

    /// Project a channel onto the canvas around its focus.
    pub fn trace(&self, index: usize) -> Result<Vec<TracePoint>> {
        let channel = self.channel(index)?;
        Ok(self.viewport.trace(channel.samples(), channel.focus()))
    }

    /// Copy of the current state for a renderer.
    pub fn snapshot(&self) -> ScopeFrame {
        ScopeFrame {
            sample_rate: self.sample_rate,
            mode: self.mode,
            viewport: self.viewport,
            channels: self
                .channels
                .iter()
                .map(|channel| ChannelFrame {
                    samples: channel.samples().to_vec(),
                    focus: channel.focus(),
                    estimate: channel.period_estimate(),
                    visible: channel.is_visible(),
                })
                .collect(),
        }
    }
}

/// Renderer-facing copy of one channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelFrame {
    pub samples: Vec<f32>,
    pub focus: f64,
    pub estimate: PeriodEstimate,
    pub visible: bool,
}

impl ChannelFrame {
    pub fn readout(&self, sample_rate: f64) -> Readout {
        Readout::from_estimate(self.estimate, sample_rate)
    }

    pub fn trace(&self, viewport: &Viewport) -> Vec<TracePoint> {
        viewport.trace(&self.samples, self.focus)
    }
}

/// Renderer-facing copy of the whole scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeFrame {
    pub sample_rate: f64,
    pub mode: Mode,
    pub viewport: Viewport,
    pub channels: Vec<ChannelFrame>,
}

impl ScopeFrame {
    /// Readouts of the visible channels, by channel index.
    pub fn readouts(&self) -> Vec<(usize, Readout)> {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, channel)| channel.visible)
            .map(|(index, channel)| (index, channel.readout(self.sample_rate)))
            .collect()
    }
}
