//! Tolerance constants for scope tests.
//!
//! Different measurements need different precision levels.

/// Floating point rounding errors (copies, exact shifts).
pub const FLOAT_EPSILON: f64 = 1e-9;

/// Relative error allowed on an estimated period for a clean sine.
pub const PERIOD_TOLERANCE: f64 = 0.01;

/// Drift allowed in the locked phase of track mode, in samples.
pub const PHASE_EPSILON: f64 = 1e-3;

/// Linear interpolation error at a sine zero crossing, in samples.
pub const CROSSING_EPSILON: f64 = 1e-3;
