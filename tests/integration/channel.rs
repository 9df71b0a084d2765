//! Channel integration tests
//!
//! The rolling window over an unbounded stream: shift-and-append, focus
//! translation and the period state carried between blocks.

use crate::helpers::tolerances::*;
use crate::helpers::*;
use approx::assert_relative_eq;
use proptest::prelude::*;
use wavescope::{Channel, MAX_CAPACITY};

/// Feeding more than a window's worth leaves exactly the newest samples.
#[test]
fn test_window_holds_newest_stream_samples() {
    let mut stream = SineStream::new(441.0, TEST_SAMPLE_RATE);
    let mut channel = Channel::new(TEST_CAPACITY);
    let mut history = Vec::new();

    for _ in 0..7 {
        let block = stream.block(TEST_BLOCK_SIZE);
        history.extend_from_slice(&block);
        channel.feed(&block);
    }

    assert_eq!(channel.samples(), &history[history.len() - TEST_CAPACITY..]);
}

/// Focus tracks a fixed point in stream time across feeds.
#[test]
fn test_focus_follows_stream_time() {
    let mut channel = Channel::new(TEST_CAPACITY);
    channel.set_focus(4000.5);

    let mut fed = 0usize;
    for len in [1, 17, 512, 0, 2048, 3] {
        channel.feed(&generate_silence(len));
        fed += len;
        assert_relative_eq!(channel.focus(), 4000.5 - fed as f64, epsilon = FLOAT_EPSILON);
    }
}

#[test]
fn test_capacity_is_clamped() {
    assert_eq!(Channel::new(MAX_CAPACITY * 4).len(), MAX_CAPACITY);
    assert_eq!(Channel::new(MAX_CAPACITY).len(), MAX_CAPACITY);
}

/// White noise never confirms a period and never disturbs the kept one.
#[test]
fn test_noise_keeps_previous_period() {
    let mut channel = Channel::new(TEST_CAPACITY);
    channel.feed(&generate_sine(441.0, TEST_SAMPLE_RATE, TEST_BLOCK_SIZE));
    assert!(channel.is_period_confident());
    let period = channel.estimated_period();

    for seed in 0..20 {
        channel.feed(&generate_noise(TEST_BLOCK_SIZE, seed));
        assert!(!channel.is_period_confident(), "noise block {seed} was confident");
        assert_eq!(channel.estimated_period(), period);
    }
}

#[test]
fn test_copy_gives_independent_storage() {
    let mut source = Channel::new(TEST_CAPACITY);
    let mut copy = Channel::new(TEST_CAPACITY);
    source.feed(&generate_sine(300.0, TEST_SAMPLE_RATE, TEST_BLOCK_SIZE));

    copy.copy_from(&source);
    let snapshot = copy.samples().to_vec();

    source.feed(&generate_noise(TEST_BLOCK_SIZE, 7));
    source.clear();

    assert_eq!(copy.samples(), &snapshot[..]);
    assert!(copy.is_period_confident());
}

proptest! {
    #[test]
    fn prop_shift_and_translate(
        capacity in 1usize..512,
        lens in prop::collection::vec(0usize..512, 1..16),
        seed in any::<u64>(),
    ) {
        let mut channel = Channel::new(capacity);
        let mut expected = vec![0.0f32; capacity];

        for (i, len) in lens.into_iter().enumerate() {
            let block = generate_noise(len.min(capacity), seed.wrapping_add(i as u64));
            let focus = channel.focus();

            channel.feed(&block);

            expected.drain(..block.len());
            expected.extend_from_slice(&block);
            prop_assert_eq!(channel.samples(), &expected[..]);
            prop_assert_eq!(channel.len(), capacity);
            prop_assert_eq!(channel.focus(), focus - block.len() as f64);
        }
    }
}
