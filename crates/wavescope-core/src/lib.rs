//! # Wavescope Core
//!
//! Oscilloscope engine for real-time waveform display.
//!
//! This crate provides:
//! - **Channels**: fixed-size rolling sample windows with a focus index
//! - **Period estimation**: normalized autocorrelation with parabolic peak refinement
//! - **Zero crossings**: linearly interpolated crossing search
//! - **Focus modes**: stream, track (phase-locked) and trigger
//! - **Scope**: multi-channel state with copy/clear commands and frame snapshots
//! - **Viewport**: division-based geometry and trace projection for renderers
//!
//! Everything operates on plain `&[f32]` blocks and runs on the caller's
//! thread. See `wavescope-live` for feeding a scope from an audio callback.
//!
//! ## Example
//!
//! ```rust
//! use wavescope_core::{Mode, Scope, ScopeConfig};
//!
//! let mut scope = Scope::new(ScopeConfig::default())?;
//! scope.set_mode(Mode::Trigger);
//!
//! let block: Vec<f32> = (0..2048)
//!     .map(|i| (i as f32 * std::f32::consts::TAU * 441.0 / 44100.0).sin())
//!     .collect();
//! scope.feed(&block);
//!
//! let frame = scope.snapshot();
//! for (channel, readout) in frame.readouts() {
//!     println!("channel {channel}: {readout}");
//! }
//! # Ok::<(), wavescope_core::Error>(())
//! ```

pub mod channel;
pub mod config;
pub mod focus;
pub mod period;
pub mod readout;
pub mod scope;
pub mod view;
pub mod zero_crossing;

mod error;

pub use channel::{Channel, MAX_CAPACITY};
pub use config::{ScopeConfig, MAX_CHANNELS};
pub use error::{Error, Result};
pub use focus::{FeedOutcome, Mode, TRIGGER_THRESHOLD};
pub use period::{estimate_period, estimate_period_into, freq_to_midi, midi_to_freq, PeriodEstimate};
pub use readout::Readout;
pub use scope::{ChannelFrame, Scope, ScopeFrame};
pub use view::{TracePoint, Viewport};
pub use zero_crossing::{find_nearest_zero_crossing, find_zero_crossing_before};
