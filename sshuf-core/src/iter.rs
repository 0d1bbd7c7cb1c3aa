//! Pull-based shuffle adapter over iterators

use crate::config::ShuffleConfig;
use crate::error::Result;
use crate::shuffler::{ShuffleStats, StreamShuffler};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;
use std::vec;

/// Iterator yielding the items of `I` in shuffled order
///
/// Input is pulled only when no shuffled output is ready, so the number of
/// items held at once is bounded by the shuffler's capacity plus the last
/// flushed half.
pub struct Shuffled<I: Iterator, R = StdRng> {
    source: I,
    state: State<I::Item, R>,
    ready: VecDeque<I::Item>,
}

enum State<T, R> {
    Ingesting(StreamShuffler<T, R>),
    Draining(vec::IntoIter<T>, ShuffleStats),
}

impl<I: Iterator, R: Rng> Shuffled<I, R> {
    /// Wrap `source` with an existing shuffler
    pub fn new(source: I, shuffler: StreamShuffler<I::Item, R>) -> Self {
        Self {
            source,
            state: State::Ingesting(shuffler),
            ready: VecDeque::new(),
        }
    }

    /// Counters of the underlying shuffler
    pub fn stats(&self) -> ShuffleStats {
        match &self.state {
            State::Ingesting(shuffler) => shuffler.stats(),
            State::Draining(_, stats) => *stats,
        }
    }
}

impl<I: Iterator, R: Rng> Iterator for Shuffled<I, R> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Some(item);
            }
            let shuffler = match &mut self.state {
                State::Ingesting(shuffler) => shuffler,
                State::Draining(rest, _) => return rest.next(),
            };
            match self.source.next() {
                Some(item) => {
                    let ready = &mut self.ready;
                    shuffler.ingest(item, |out| ready.push_back(out));
                }
                None => {
                    let finished = std::mem::replace(
                        &mut self.state,
                        State::Draining(Vec::new().into_iter(), ShuffleStats::default()),
                    );
                    if let State::Ingesting(shuffler) = finished {
                        let (rest, stats) = shuffler.into_remaining();
                        self.state = State::Draining(rest, stats);
                    }
                }
            }
        }
    }
}

/// Extension trait adding streaming shuffles to every iterator
pub trait ShuffleExt: Iterator + Sized {
    /// Shuffle this iterator with the given configuration
    fn shuffled(self, config: ShuffleConfig) -> Result<Shuffled<Self>> {
        let shuffler = StreamShuffler::with_config(config)?;
        Ok(Shuffled::new(self, shuffler))
    }

    /// Shuffle this iterator drawing from `rng`
    fn shuffled_with_rng<R: Rng>(self, config: ShuffleConfig, rng: R) -> Result<Shuffled<Self, R>> {
        let shuffler = StreamShuffler::with_rng(config, rng)?;
        Ok(Shuffled::new(self, shuffler))
    }
}

impl<I: Iterator> ShuffleExt for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_shuffled_yields_every_item_once() {
        let config = ShuffleConfig::with_window_min(4);
        let mut out: Vec<u32> = (0..50)
            .shuffled_with_rng(config, StdRng::seed_from_u64(17))
            .unwrap()
            .collect();
        out.sort_unstable();
        assert_eq!(out, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffled_empty_source() {
        let mut iter = std::iter::empty::<u8>()
            .shuffled(ShuffleConfig::default())
            .unwrap();
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_shuffled_emits_before_source_ends() {
        // An endless source still produces output once the window overflows.
        let config = ShuffleConfig::with_window_min(8);
        let first: Vec<u64> = (0u64..)
            .shuffled_with_rng(config, StdRng::seed_from_u64(1))
            .unwrap()
            .take(4)
            .collect();
        assert_eq!(first.len(), 4);
        assert!(first.iter().all(|&x| x < 8));
    }

    #[test]
    fn test_shuffled_stats_after_exhaustion() {
        let mut iter = (0..10)
            .shuffled_with_rng(ShuffleConfig::with_window_min(4), StdRng::seed_from_u64(3))
            .unwrap();
        let count = iter.by_ref().count();
        assert_eq!(count, 10);
        let stats = iter.stats();
        assert_eq!(stats.ingested, 10);
        assert_eq!(stats.emitted, 10);
    }

    #[test]
    fn test_shuffled_rejects_invalid_config() {
        let result = (0..3).shuffled(ShuffleConfig::with_window_min(0));
        assert!(result.is_err());
    }
}
