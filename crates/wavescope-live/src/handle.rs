//! UI-side handle to a running scope thread

use crate::live::{LiveScopeState, ScopeCommand};
use crate::{Error, Result};
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use wavescope_core::{Mode, ScopeFrame, Viewport};

/// Handle to a live scope.
///
/// Created by [`spawn_live_scope`](crate::spawn_live_scope). Reads are
/// lock-free; setters queue a [`ScopeCommand`] that the scope thread applies
/// before its next block. Arguments are checked against the latest frame so
/// bad values fail here instead of being dropped on the scope thread.
///
/// Dropping the handle stops the thread.
pub struct ScopeHandle {
    state: Arc<LiveScopeState>,
    commands: Sender<ScopeCommand>,
    thread: Option<JoinHandle<()>>,
}

impl ScopeHandle {
    pub(crate) fn new(
        state: Arc<LiveScopeState>,
        commands: Sender<ScopeCommand>,
        thread: JoinHandle<()>,
    ) -> Self {
        Self {
            state,
            commands,
            thread: Some(thread),
        }
    }

    /// Latest published frame.
    pub fn frame(&self) -> Arc<ScopeFrame> {
        self.state.frame.load_full()
    }

    /// Number of frames published so far.
    pub fn frame_count(&self) -> u64 {
        self.state.frame_count()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn set_mode(&self, mode: Mode) -> Result<()> {
        self.send(ScopeCommand::SetMode(mode))
    }

    /// Horizontal scale in milliseconds per division.
    pub fn set_time_per_division(&self, ms: f64) -> Result<()> {
        let frame = self.frame();
        Viewport {
            samples_per_division: ms / 1000.0 * frame.sample_rate,
            ..frame.viewport
        }
        .validate()?;
        self.send(ScopeCommand::SetTimePerDivision(ms))
    }

    pub fn set_volume_per_division(&self, value: f64) -> Result<()> {
        Viewport {
            value_per_division: value,
            ..self.frame().viewport
        }
        .validate()?;
        self.send(ScopeCommand::SetVolumePerDivision(value))
    }

    pub fn set_viewport_size(&self, width: f64, height: f64) -> Result<()> {
        Viewport {
            width,
            height,
            ..self.frame().viewport
        }
        .validate()?;
        self.send(ScopeCommand::SetViewportSize { width, height })
    }

    pub fn set_channel_visible(&self, channel: usize, visible: bool) -> Result<()> {
        self.check_channel(channel)?;
        self.send(ScopeCommand::SetChannelVisible { channel, visible })
    }

    pub fn copy_channel(&self, from: usize, to: usize) -> Result<()> {
        self.check_channel(from)?;
        self.check_channel(to)?;
        self.send(ScopeCommand::CopyChannel { from, to })
    }

    pub fn clear_channel(&self, channel: usize) -> Result<()> {
        self.check_channel(channel)?;
        self.send(ScopeCommand::ClearChannel(channel))
    }

    pub fn resize_buffers(&self, capacity: usize) -> Result<()> {
        self.send(ScopeCommand::ResizeBuffers(capacity))
    }

    pub fn set_autocorrelation_view(&self, channel: Option<usize>) -> Result<()> {
        if let Some(index) = channel {
            self.check_channel(index)?;
        }
        self.send(ScopeCommand::SetAutocorrelationView(channel))
    }

    /// Stop the scope thread and wait for it to exit.
    pub fn stop(&mut self) {
        self.state.stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("scope thread panicked");
            }
        }
    }

    fn check_channel(&self, index: usize) -> Result<()> {
        let count = self.state.frame.load().channels.len();
        if index < count {
            Ok(())
        } else {
            Err(wavescope_core::Error::ChannelOutOfRange { index, count }.into())
        }
    }

    fn send(&self, command: ScopeCommand) -> Result<()> {
        if !self.is_running() {
            return Err(Error::Stopped);
        }
        self.commands.send(command).map_err(|_| Error::Stopped)
    }
}

impl Drop for ScopeHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
