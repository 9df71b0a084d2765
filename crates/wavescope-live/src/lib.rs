//! # Wavescope Live
//!
//! Feeds a [`Scope`](wavescope_core::Scope) from an audio callback without
//! locks on the audio thread.
//!
//! ```text
//! audio callback -> HeapProd<f32> -> scope thread -> ArcSwap<ScopeFrame> -> UI
//!                                         ^
//!                     ScopeHandle -> ScopeCommand
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ringbuf::traits::Producer;
//! use wavescope_core::{Scope, ScopeConfig};
//! use wavescope_live::spawn_live_scope;
//!
//! let scope = Scope::new(ScopeConfig::default())?;
//! let (mut producer, handle) = spawn_live_scope(scope, 16384, 2048)?;
//!
//! // In the audio callback
//! producer.push_slice(&[0.0; 512]);
//!
//! // In the UI
//! let frame = handle.frame();
//! assert_eq!(frame.channels.len(), 4);
//! # Ok::<(), wavescope_live::Error>(())
//! ```

pub mod live;

mod error;
mod handle;

pub use error::{Error, Result};
pub use handle::ScopeHandle;
pub use live::{run_scope_thread, spawn_live_scope, LiveScopeState, ScopeCommand};
pub use ringbuf::HeapProd;
