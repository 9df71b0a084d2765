//! Error types for wavescope-core.

use thiserror::Error;

/// Error type for wavescope-core operations.
///
/// Numeric degeneracy (empty blocks, silent input, oversized capacities) is
/// clamped rather than reported; only requests that cannot be clamped into
/// something meaningful end up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Channel index {index} out of range (scope has {count} channels)")]
    ChannelOutOfRange { index: usize, count: usize },
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
