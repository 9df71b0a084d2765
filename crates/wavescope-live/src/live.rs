//! Live scope via ring buffer tap.
//!
//! The audio callback pushes mono samples into a SPSC ring buffer. A single
//! scope thread drains it in fixed-size blocks, feeds them to a [`Scope`],
//! applies UI commands between blocks and publishes a [`ScopeFrame`] through
//! `ArcSwap` for lock-free reads.

use crate::handle::ScopeHandle;
use crate::{Error, Result};
use arc_swap::ArcSwap;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use crossbeam_channel::Receiver;
use ringbuf::{
    traits::{Consumer, Split},
    HeapCons, HeapProd, HeapRb,
};
use std::sync::Arc;
use std::time::Duration;
use wavescope_core::{Mode, Scope, ScopeFrame};

/// Sleep between polls when the ring buffer is empty.
const IDLE_SLEEP: Duration = Duration::from_millis(2);

/// Request from the UI, applied by the scope thread between blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeCommand {
    SetMode(Mode),
    SetTimePerDivision(f64),
    SetVolumePerDivision(f64),
    SetViewportSize { width: f64, height: f64 },
    SetChannelVisible { channel: usize, visible: bool },
    CopyChannel { from: usize, to: usize },
    ClearChannel(usize),
    ResizeBuffers(usize),
    SetAutocorrelationView(Option<usize>),
}

impl ScopeCommand {
    /// Apply to `scope`.
    pub fn apply(&self, scope: &mut Scope) -> wavescope_core::Result<()> {
        match *self {
            ScopeCommand::SetMode(mode) => {
                scope.set_mode(mode);
                Ok(())
            }
            ScopeCommand::SetTimePerDivision(ms) => scope.set_time_per_division(ms),
            ScopeCommand::SetVolumePerDivision(value) => scope.set_volume_per_division(value),
            ScopeCommand::SetViewportSize { width, height } => {
                scope.set_viewport_size(width, height)
            }
            ScopeCommand::SetChannelVisible { channel, visible } => {
                scope.set_channel_visible(channel, visible)
            }
            ScopeCommand::CopyChannel { from, to } => scope.copy_channel(from, to),
            ScopeCommand::ClearChannel(channel) => scope.clear_channel(channel),
            ScopeCommand::ResizeBuffers(capacity) => {
                scope.resize_buffers(capacity);
                Ok(())
            }
            ScopeCommand::SetAutocorrelationView(channel) => {
                scope.set_autocorrelation_view(channel)
            }
        }
    }
}

/// Shared state between the scope thread and [`ScopeHandle`].
pub struct LiveScopeState {
    /// Latest published frame.
    pub frame: ArcSwap<ScopeFrame>,
    frames: AtomicU64,
    running: AtomicBool,
}

impl LiveScopeState {
    pub fn new(initial: ScopeFrame) -> Self {
        Self {
            frame: ArcSwap::from_pointee(initial),
            frames: AtomicU64::new(0),
            running: AtomicBool::new(true),
        }
    }

    /// Signal the scope thread to stop.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Number of frames published so far.
    pub fn frame_count(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    fn publish(&self, scope: &Scope) {
        self.frame.store(Arc::new(scope.snapshot()));
        self.frames.fetch_add(1, Ordering::AcqRel);
    }
}

fn clamp_block_size(block_size: usize, scope: &Scope) -> usize {
    block_size.clamp(1, scope.buffer_capacity().max(1))
}

/// Run the scope loop.
///
/// Every complete block of `block_size` samples (clamped to the scope's
/// buffer capacity) is fed and published. Commands are applied before each
/// read, so they are ordered with respect to feeds.
///
/// This function blocks until `state.stop()` is called or every command
/// sender has been dropped.
pub fn run_scope_thread(
    mut consumer: HeapCons<f32>,
    commands: Receiver<ScopeCommand>,
    state: Arc<LiveScopeState>,
    mut scope: Scope,
    block_size: usize,
) {
    let mut block = vec![0.0f32; clamp_block_size(block_size, &scope)];
    let mut filled = 0usize;

    tracing::debug!(block_size = block.len(), "scope thread started");

    while state.is_running() {
        let mut changed = false;

        loop {
            match commands.try_recv() {
                Ok(command) => {
                    if let Err(e) = command.apply(&mut scope) {
                        tracing::warn!(?command, error = %e, "scope command rejected");
                    }
                    if let ScopeCommand::ResizeBuffers(_) = command {
                        let len = clamp_block_size(block_size, &scope);
                        block.resize(len, 0.0);
                        filled = filled.min(len);
                    }
                    changed = true;
                }
                Err(crossbeam_channel::TryRecvError::Empty) => break,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    state.stop();
                    break;
                }
            }
        }

        let read = consumer.pop_slice(&mut block[filled..]);
        filled += read;
        if filled == block.len() {
            scope.feed(&block);
            filled = 0;
            changed = true;
        }

        if changed {
            state.publish(&scope);
        } else if read == 0 {
            std::thread::sleep(IDLE_SLEEP);
        }
    }

    tracing::debug!("scope thread stopped");
}

/// Start a scope thread fed from a ring buffer of `ring_capacity` samples.
///
/// Returns the producer half for the audio callback and a handle for the UI.
pub fn spawn_live_scope(
    scope: Scope,
    ring_capacity: usize,
    block_size: usize,
) -> Result<(HeapProd<f32>, ScopeHandle)> {
    let (producer, consumer) = HeapRb::<f32>::new(ring_capacity.max(1)).split();
    let (command_tx, command_rx) = crossbeam_channel::unbounded();

    let state = Arc::new(LiveScopeState::new(scope.snapshot()));
    let thread_state = Arc::clone(&state);

    let thread = std::thread::Builder::new()
        .name("wavescope-live".into())
        .spawn(move || run_scope_thread(consumer, command_rx, thread_state, scope, block_size))
        .map_err(Error::Spawn)?;

    Ok((producer, ScopeHandle::new(state, command_tx, thread)))
}
