//! # Wavescope - Real-time Waveform Scope
//!
//! Oscilloscope engine for audio streams, built from two subsystems.
//!
//! ## Architecture
//!
//! - **wavescope-core** - Channels, period estimation, zero crossings, focus modes, viewport
//! - **wavescope-live** - Ring buffer tap from an audio callback into a scope thread
//!
//! ## Quick Start
//!
//! ```rust
//! use wavescope::prelude::*;
//!
//! let mut scope = wavescope::builder()
//!     .sample_rate(48000.0)
//!     .buffer_size(16384)
//!     .mode(Mode::Track)
//!     .time_per_division(2.0)
//!     .build()?;
//!
//! let block: Vec<f32> = (0..2048)
//!     .map(|i| (i as f32 * std::f32::consts::TAU * 480.0 / 48000.0).sin())
//!     .collect();
//! scope.feed(&block);
//!
//! println!("{}", scope.readout(0)?);
//! # Ok::<(), wavescope::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Core engine plus the live tap
//! - `live` - Background scope thread fed by a lock-free ring buffer

/// Re-export of wavescope-core for direct access
pub use wavescope_core as core;

pub use wavescope_core::{
    estimate_period, find_nearest_zero_crossing, find_zero_crossing_before, Channel,
    ChannelFrame, FeedOutcome, Mode, PeriodEstimate, Readout, Scope, ScopeConfig, ScopeFrame,
    TracePoint, Viewport, MAX_CAPACITY, MAX_CHANNELS, TRIGGER_THRESHOLD,
};

#[cfg(feature = "live")]
pub use wavescope_live as live;

#[cfg(feature = "live")]
pub use wavescope_live::{spawn_live_scope, HeapProd, ScopeCommand, ScopeHandle};

mod builder;
mod error;

pub use builder::WaveScopeBuilder;
pub use error::{Error, Result};

/// Start configuring a scope.
pub fn builder() -> WaveScopeBuilder {
    WaveScopeBuilder::default()
}

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{builder, Error, WaveScopeBuilder};

    pub use crate::core::{FeedOutcome, Mode, Readout, Scope, ScopeConfig, ScopeFrame, Viewport};

    #[cfg(feature = "live")]
    pub use crate::live::ScopeHandle;
}
