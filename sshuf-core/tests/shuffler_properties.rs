//! Property tests for completeness and bounded buffering

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sshuf_core::{ShuffleConfig, ShuffleExt, StreamShuffler};

fn config(window_min: usize, window_max: Option<usize>, growth_factor: usize) -> ShuffleConfig {
    ShuffleConfig::builder()
        .window_min(window_min)
        .window_max(window_max)
        .growth_factor(growth_factor)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn test_every_record_emitted_exactly_once(
        records in proptest::collection::vec(0u16..64, 0..400),
        window_min in 1usize..40,
        growth_factor in 2usize..5,
        seed in any::<u64>(),
    ) {
        let mut shuffler = StreamShuffler::with_rng(
            config(window_min, None, growth_factor),
            StdRng::seed_from_u64(seed),
        ).unwrap();
        let mut out = Vec::with_capacity(records.len());
        for &record in &records {
            shuffler.ingest(record, |r| out.push(r));
        }
        shuffler.finish(|r| out.push(r));

        let mut expected = records.clone();
        expected.sort_unstable();
        out.sort_unstable();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn test_buffer_never_exceeds_capacity(
        count in 0usize..600,
        window_min in 1usize..32,
        extra in proptest::option::of(0usize..64),
        seed in any::<u64>(),
    ) {
        let window_max = extra.map(|e| window_min + e);
        let mut shuffler = StreamShuffler::with_rng(
            config(window_min, window_max, 2),
            StdRng::seed_from_u64(seed),
        ).unwrap();
        let mut last_capacity = shuffler.capacity();
        for i in 0..count {
            shuffler.ingest(i, |_| {});
            prop_assert!(shuffler.len() <= shuffler.capacity());
            prop_assert!(shuffler.capacity() >= last_capacity);
            if let Some(max) = window_max {
                prop_assert!(shuffler.capacity() <= max);
            }
            last_capacity = shuffler.capacity();
        }
        let stats = shuffler.finish(|_| {});
        prop_assert_eq!(stats.emitted, count as u64);
    }

    #[test]
    fn test_iterator_adapter_is_a_permutation(
        records in proptest::collection::vec(any::<u8>(), 0..300),
        window_min in 1usize..20,
        seed in any::<u64>(),
    ) {
        let mut out: Vec<u8> = records
            .iter()
            .copied()
            .shuffled_with_rng(config(window_min, None, 2), StdRng::seed_from_u64(seed))
            .unwrap()
            .collect();
        let mut expected = records;
        expected.sort_unstable();
        out.sort_unstable();
        prop_assert_eq!(out, expected);
    }
}

#[test]
fn test_capacity_doubles_per_overflow() {
    let mut shuffler = StreamShuffler::with_rng(
        ShuffleConfig::with_window_min(4),
        StdRng::seed_from_u64(99),
    )
    .unwrap();
    let mut seen = vec![shuffler.capacity()];
    for i in 0..1000 {
        shuffler.ingest(i, |_| {});
        if *seen.last().unwrap() != shuffler.capacity() {
            seen.push(shuffler.capacity());
        }
    }
    for pair in seen.windows(2) {
        assert_eq!(pair[1], pair[0] * 2);
    }
    assert!(shuffler.capacity() >= 8);
}

#[test]
fn test_peak_memory_is_logarithmic_in_overflows() {
    let mut shuffler =
        StreamShuffler::with_rng(ShuffleConfig::with_window_min(16), StdRng::seed_from_u64(5))
            .unwrap();
    for i in 0..100_000u32 {
        shuffler.ingest(i, |_| {});
    }
    let stats = shuffler.stats();
    // Retained halves keep the buffer well under the input length.
    assert!(stats.peak_buffered < 100_000);
    assert!(stats.overflows <= 20);
    assert_eq!(stats.capacity, 16 << stats.overflows);
}
