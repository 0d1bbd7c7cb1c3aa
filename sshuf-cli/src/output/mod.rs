//! Output module

use anyhow::Result;

/// Trait for record sinks
pub trait RecordSink {
    /// Write a single record
    fn write_record(&mut self, record: &[u8]) -> Result<()>;

    /// Finalize output (flush buffered bytes)
    fn finish(&mut self) -> Result<()>;
}

pub mod delimited;

pub use delimited::DelimitedWriter;
