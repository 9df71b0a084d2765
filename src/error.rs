//! Centralized error type for the wavescope umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] wavescope_core::Error),

    #[cfg(feature = "live")]
    #[error("Live: {0}")]
    Live(#[from] wavescope_live::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
