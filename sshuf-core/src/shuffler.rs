//! Bounded-memory streaming shuffler
//!
//! Records are buffered up to a predicted capacity. When a record arrives
//! and the buffer is full, the buffer is shuffled, a random half is emitted
//! immediately and the capacity grows by the configured factor. At end of
//! input the remaining records are shuffled and emitted.
//!
//! Memory use is bounded by the final capacity, which grows logarithmically
//! in the number of overflows rather than linearly in the input length.

use crate::config::ShuffleConfig;
use crate::error::Result;
use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::vec;

/// Counters describing one shuffler's run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShuffleStats {
    /// Records accepted by `ingest`
    pub ingested: u64,
    /// Records emitted, by overflow flushes or by `finish`
    pub emitted: u64,
    /// Number of overflow events
    pub overflows: u64,
    /// Largest buffer length observed
    pub peak_buffered: usize,
    /// Capacity at the time the stats were taken
    pub capacity: usize,
}

/// Streaming shuffler over records of type `T`
///
/// The random source is owned by the instance. [`StreamShuffler::with_rng`]
/// accepts any [`Rng`], which makes seeded or scripted generators usable in
/// tests.
#[derive(Debug)]
pub struct StreamShuffler<T, R = StdRng> {
    buffer: Vec<T>,
    capacity: usize,
    config: ShuffleConfig,
    rng: R,
    stats: ShuffleStats,
}

impl<T> StreamShuffler<T, StdRng> {
    /// Create a shuffler with the given initial window and default settings
    pub fn new(window_min: usize) -> Result<Self> {
        Self::with_config(ShuffleConfig::with_window_min(window_min))
    }

    /// Create a shuffler from a full configuration
    ///
    /// A configured seed gives a reproducible [`StdRng`]; otherwise the
    /// generator is seeded from the operating system.
    pub fn with_config(config: ShuffleConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(OsRng)?,
        };
        Ok(Self::from_parts(config, rng))
    }
}

impl<T, R: Rng> StreamShuffler<T, R> {
    /// Create a shuffler that draws from the supplied generator
    ///
    /// `config.seed` is ignored here.
    pub fn with_rng(config: ShuffleConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, rng))
    }

    fn from_parts(config: ShuffleConfig, rng: R) -> Self {
        let capacity = config.window_min;
        Self {
            buffer: Vec::new(),
            capacity,
            config,
            rng,
            stats: ShuffleStats {
                capacity,
                ..ShuffleStats::default()
            },
        }
    }

    /// Current capacity prediction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of buffered records
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether no records are buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Active configuration
    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Snapshot of the run counters
    pub fn stats(&self) -> ShuffleStats {
        ShuffleStats {
            capacity: self.capacity,
            ..self.stats
        }
    }

    /// Accept one record, emitting zero or more records through `emit`
    ///
    /// Records are only emitted when the buffer is full on arrival.
    pub fn ingest<F>(&mut self, record: T, mut emit: F)
    where
        F: FnMut(T),
    {
        if self.buffer.len() >= self.capacity {
            self.overflow(&mut emit);
        }
        self.buffer.push(record);
        self.stats.ingested += 1;
        self.stats.peak_buffered = self.stats.peak_buffered.max(self.buffer.len());
    }

    /// Emit every remaining record in uniformly random order
    ///
    /// Consumes the shuffler; no records can be ingested afterwards.
    pub fn finish<F>(self, mut emit: F) -> ShuffleStats
    where
        F: FnMut(T),
    {
        let (remaining, stats) = self.into_remaining();
        for record in remaining {
            emit(record);
        }
        stats
    }

    /// Shuffle the remaining records and hand them back as an iterator
    ///
    /// The returned stats already count every remaining record as emitted.
    pub fn into_remaining(mut self) -> (vec::IntoIter<T>, ShuffleStats) {
        self.buffer.shuffle(&mut self.rng);
        self.stats.emitted += self.buffer.len() as u64;
        log::trace!(
            "finishing with {} buffered records after {} overflows",
            self.buffer.len(),
            self.stats.overflows
        );
        let stats = self.stats();
        (self.buffer.into_iter(), stats)
    }

    fn overflow<F>(&mut self, emit: &mut F)
    where
        F: FnMut(T),
    {
        let len = self.buffer.len();
        let next_capacity = self.config.grow(self.capacity);

        self.buffer.shuffle(&mut self.rng);

        // An odd buffer cannot split evenly; a fair coin decides which side
        // receives the extra record.
        let mut flush = len / 2;
        if len % 2 == 1 && self.rng.gen_bool(0.5) {
            flush += 1;
        }
        // The retained records plus the pending one must fit the new capacity.
        let flush = flush.max((len + 1).saturating_sub(next_capacity));
        let retain = len - flush;

        for record in self.buffer.drain(retain..) {
            emit(record);
        }

        self.stats.emitted += flush as u64;
        self.stats.overflows += 1;
        log::debug!(
            "overflow #{}: flushed {} of {} records, capacity {} -> {}",
            self.stats.overflows,
            flush,
            len,
            self.capacity,
            next_capacity
        );
        self.capacity = next_capacity;
    }
}
