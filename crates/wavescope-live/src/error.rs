//! Error types for wavescope-live.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] wavescope_core::Error),

    #[error("Scope thread has stopped")]
    Stopped,

    #[error("Failed to spawn scope thread: {0}")]
    Spawn(#[source] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
