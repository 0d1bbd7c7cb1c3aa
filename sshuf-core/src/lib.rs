//! Streaming shuffle of record sequences in bounded memory
//!
//! [`StreamShuffler`] accepts records one at a time and emits them in a
//! randomized order without holding the whole input. Its buffer starts at a
//! configured window and grows geometrically each time it overflows, with a
//! random half of the buffer flushed on every overflow.
//!
//! ```
//! use sshuf_core::StreamShuffler;
//!
//! let mut shuffler = StreamShuffler::new(4).unwrap();
//! let mut out = Vec::new();
//! for line in ["a", "b", "c", "d", "e"] {
//!     shuffler.ingest(line, |record| out.push(record));
//! }
//! shuffler.finish(|record| out.push(record));
//! assert_eq!(out.len(), 5);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod iter;
pub mod shuffler;

pub use config::{ShuffleConfig, ShuffleConfigBuilder, DEFAULT_GROWTH_FACTOR, DEFAULT_WINDOW_MIN};
pub use error::{Result, ShuffleError};
pub use iter::{ShuffleExt, Shuffled};
pub use shuffler::{ShuffleStats, StreamShuffler};
