//! Scope integration tests
//!
//! Comparison channels, snapshots, readouts and viewport projection.

use crate::helpers::tolerances::*;
use crate::helpers::*;
use approx::assert_relative_eq;
use wavescope::prelude::*;

fn fed_scope() -> Scope {
    let mut scope = test_scope(Mode::Track);
    let mut stream = SineStream::new(441.0, TEST_SAMPLE_RATE);
    for _ in 0..4 {
        scope.feed(&stream.block(TEST_BLOCK_SIZE));
    }
    scope
}

#[test]
fn test_copy_is_idempotent_and_independent() {
    let mut scope = fed_scope();

    scope.copy_channel(0, 1).unwrap();
    let once = scope.snapshot().channels[1].clone();
    scope.copy_channel(0, 1).unwrap();
    let twice = scope.snapshot().channels[1].clone();
    assert_eq!(once.samples, twice.samples);
    assert_eq!(once.focus, twice.focus);
    assert_eq!(once.estimate, twice.estimate);

    let input = scope.snapshot().channels[0].clone();
    assert_eq!(once.samples, input.samples);
    assert_eq!(once.focus, input.focus);
    assert_eq!(once.estimate, input.estimate);

    // Later input does not reach the copy
    scope.feed(&generate_noise(TEST_BLOCK_SIZE, 11));
    assert_eq!(scope.channel(1).unwrap().samples(), &once.samples[..]);
    assert_eq!(scope.channel(1).unwrap().focus(), once.focus);
}

#[test]
fn test_clear_is_idempotent() {
    let mut scope = fed_scope();
    scope.copy_channel(0, 2).unwrap();

    scope.clear_channel(2).unwrap();
    let once = scope.snapshot();
    scope.clear_channel(2).unwrap();
    assert_eq!(scope.snapshot(), once);
    assert!(once.channels[2].samples.iter().all(|&s| s == 0.0));

    // The input is untouched
    assert!(once.channels[0].samples.iter().any(|&s| s != 0.0));
}

#[test]
fn test_out_of_range_channels() {
    let mut scope = fed_scope();
    let count = scope.channel_count();
    let out_of_range = wavescope::core::Error::ChannelOutOfRange { index: count, count };

    assert_eq!(scope.copy_channel(0, count).unwrap_err(), out_of_range);
    assert_eq!(scope.copy_channel(count, 0).unwrap_err(), out_of_range);
    assert_eq!(scope.clear_channel(count).unwrap_err(), out_of_range);
    assert!(scope.readout(count).is_err());
    assert!(scope.trace(count).is_err());
}

#[test]
fn test_readout_of_441_hz() {
    let scope = fed_scope();
    let readout = scope.readout(0).unwrap();

    assert_relative_eq!(readout.frequency.unwrap(), 441.0, max_relative = PERIOD_TOLERANCE);
    assert_relative_eq!(readout.period_ms.unwrap(), 100.0 / 44.1, max_relative = PERIOD_TOLERANCE);
    assert_eq!(readout.note_name().as_deref(), Some("A4"));
    assert!(readout.to_string().starts_with("frequency = 44"));

    // Comparison channels have no estimate until copied
    assert_eq!(scope.readout(1).unwrap().to_string(), "frequency = --\nperiod = --");
}

#[test]
fn test_readouts_follow_visibility() {
    let mut scope = fed_scope();
    scope.copy_channel(0, 3).unwrap();
    scope.set_channel_visible(3, true).unwrap();

    let readouts = scope.readouts();
    assert_eq!(readouts.len(), 2);
    assert_eq!(readouts[0].0, 0);
    assert_eq!(readouts[1].0, 3);
    assert_eq!(readouts[0].1, readouts[1].1);

    assert!(!scope.toggle_channel_visible(0).unwrap());
    assert_eq!(scope.readouts().len(), 1);
}

#[test]
fn test_autocorrelation_view_tracks_input() {
    let mut scope = wavescope::builder()
        .sample_rate(TEST_SAMPLE_RATE)
        .buffer_size(TEST_CAPACITY)
        .autocorrelation_channel(1)
        .build()
        .unwrap();

    scope.feed(&generate_sine(441.0, TEST_SAMPLE_RATE, TEST_BLOCK_SIZE));
    let view = scope.channel(1).unwrap();
    assert_relative_eq!(view.samples()[0], 1.0);
    // Correlation peaks one period later
    assert!(view.samples()[100] > view.samples()[99]);
    assert!(view.samples()[100] > view.samples()[101]);
    assert!(view.samples()[50] < -0.9);
    assert_eq!(view.focus(), TEST_BLOCK_SIZE as f64 / 2.0);

    scope.set_autocorrelation_view(None).unwrap();
    let before = scope.channel(1).unwrap().samples().to_vec();
    scope.feed(&generate_noise(TEST_BLOCK_SIZE, 5));
    assert_eq!(scope.channel(1).unwrap().samples(), &before[..]);
}

#[test]
fn test_resize_resets_everything() {
    let mut scope = fed_scope();
    scope.copy_channel(0, 1).unwrap();
    scope.resize_buffers(1024);

    for channel in scope.channels() {
        assert_eq!(channel.len(), 1024);
        assert_eq!(channel.focus(), 512.0);
        assert!(!channel.is_period_confident());
        assert!(channel.samples().iter().all(|&s| s == 0.0));
    }
}

#[test]
fn test_trace_projection() {
    let mut scope = fed_scope();
    scope.set_viewport_size(800.0, 600.0).unwrap();
    scope.set_time_per_division(1.0).unwrap();
    scope.set_volume_per_division(0.5).unwrap();

    // 800 px / 64 px * 44.1 samples per division
    assert_eq!(scope.max_visible_len(), 552);
    assert_relative_eq!(scope.time_per_division(), 1.0, epsilon = FLOAT_EPSILON);

    let trace = scope.trace(0).unwrap();
    assert!(!trace.is_empty());
    for point in &trace {
        // Edge samples may sit up to one sample width outside the canvas
        assert!((-2.0..=802.0).contains(&point.x));
        // Full-scale sine spans two divisions each way at 0.5 per division
        assert!((300.0 - 128.0 - 1e-3..=300.0 + 128.0 + 1e-3).contains(&(point.y as f64)));
    }
    assert!(trace.windows(2).all(|pair| pair[0].x < pair[1].x));
}

#[test]
fn test_scale_validation() {
    let mut scope = fed_scope();
    let viewport = scope.viewport();

    assert!(scope.set_time_per_division(0.0).is_err());
    assert!(scope.set_volume_per_division(f64::NAN).is_err());
    assert!(scope.set_viewport_size(-1.0, 600.0).is_err());
    assert_eq!(scope.viewport(), viewport);
}
