//! Delimited record writer

use super::RecordSink;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes each record followed by the delimiter
pub struct DelimitedWriter<W: Write> {
    writer: W,
    delimiter: u8,
    written: u64,
}

impl<W: Write> DelimitedWriter<W> {
    /// Create a new delimited writer
    pub fn new(writer: W, delimiter: u8) -> Self {
        Self {
            writer,
            delimiter,
            written: 0,
        }
    }

    /// Number of records written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Recover the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl DelimitedWriter<Box<dyn Write>> {
    /// Writer to `path`, or to stdout when no path is given
    pub fn create(path: Option<&Path>, delimiter: u8) -> Result<Self> {
        let writer: Box<dyn Write> = match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };
        Ok(Self::new(writer, delimiter))
    }
}

impl<W: Write> RecordSink for DelimitedWriter<W> {
    fn write_record(&mut self, record: &[u8]) -> Result<()> {
        self.writer.write_all(record)?;
        self.writer.write_all(&[self.delimiter])?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
