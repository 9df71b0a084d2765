//! Integration test modules for wavescope

pub mod channel;
pub mod scope;
