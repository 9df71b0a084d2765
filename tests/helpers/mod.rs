//! Test helpers and fixtures for wavescope integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-9): Exact operations (copies, shifts)
//! - `PERIOD_TOLERANCE` (1%): Period estimates of clean sines
//! - `PHASE_EPSILON` (1e-3): Track mode phase lock
//! - `CROSSING_EPSILON` (1e-3): Interpolated zero crossings

#![allow(dead_code)]

pub mod tolerances;

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};
use wavescope::prelude::*;

/// Default test sample rate
pub const TEST_SAMPLE_RATE: f64 = 44100.0;

/// Block size delivered per feed, like an audio callback
pub const TEST_BLOCK_SIZE: usize = 2048;

/// Channel capacity used by most tests
pub const TEST_CAPACITY: usize = 8192;

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

/// Create a test scope with the test capacity and sample rate.
pub fn test_scope(mode: Mode) -> Scope {
    init_tracing();
    wavescope::builder()
        .sample_rate(TEST_SAMPLE_RATE)
        .buffer_size(TEST_CAPACITY)
        .mode(mode)
        .build()
        .expect("Failed to create test scope")
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    SineStream::new(frequency, sample_rate).block(num_samples)
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Generate white noise (uniform in -1..1), reproducible from `seed`.
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_samples).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Continuous sine split into consecutive blocks.
pub struct SineStream {
    frequency: f64,
    sample_rate: f64,
    amplitude: f64,
    position: usize,
}

impl SineStream {
    pub fn new(frequency: f64, sample_rate: f64) -> Self {
        Self {
            frequency,
            sample_rate,
            amplitude: 1.0,
            position: 0,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Samples produced so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn block(&mut self, len: usize) -> Vec<f32> {
        let start = self.position;
        self.position += len;
        (start..start + len)
            .map(|i| {
                let t = i as f64 / self.sample_rate;
                (self.amplitude * (2.0 * std::f64::consts::PI * self.frequency * t).sin()) as f32
            })
            .collect()
    }
}

/// Smallest distance between two phases on a circle of `period`.
pub fn phase_distance(a: f64, b: f64, period: f64) -> f64 {
    let d = (a - b).rem_euclid(period);
    d.min(period - d)
}

/// Poll `condition` until it holds or `max_wait_ms` passes.
pub fn wait_until(max_wait_ms: u64, mut condition: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    let timeout = Duration::from_millis(max_wait_ms);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    false
}
