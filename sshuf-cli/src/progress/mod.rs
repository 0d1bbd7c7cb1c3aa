//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Records between spinner updates
const UPDATE_INTERVAL: u64 = 4096;

/// Progress reporter for record processing, drawn on stderr
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    pending: u64,
}

impl ProgressReporter {
    /// Create a new progress reporter; a disabled reporter draws nothing
    pub fn new(enabled: bool) -> Self {
        let progress_bar = enabled.then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner:.cyan} [{elapsed_precise}] {pos} records read {msg}",
            ) {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        Self {
            progress_bar,
            pending: 0,
        }
    }

    /// Start reading a new input source
    pub fn source_started(&self, name: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("from {name}"));
        }
    }

    /// Count one record read
    pub fn record_read(&mut self) {
        if self.progress_bar.is_none() {
            return;
        }
        self.pending += 1;
        if self.pending >= UPDATE_INTERVAL {
            self.flush_pending();
        }
    }

    fn flush_pending(&mut self) {
        if let Some(pb) = &self.progress_bar {
            pb.inc(self.pending);
        }
        self.pending = 0;
    }

    /// Finish progress reporting
    pub fn finish(&mut self) {
        self.flush_pending();
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("done");
        }
    }

    /// Records counted so far
    #[cfg(test)]
    fn position(&self) -> u64 {
        self.progress_bar
            .as_ref()
            .map_or(0, |pb| pb.position() + self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_counts_nothing() {
        let mut reporter = ProgressReporter::new(false);
        reporter.record_read();
        reporter.finish();
        assert_eq!(reporter.position(), 0);
    }

    #[test]
    fn test_enabled_reporter_counts_records() {
        let mut reporter = ProgressReporter::new(true);
        reporter.source_started("input.txt");
        for _ in 0..(UPDATE_INTERVAL + 10) {
            reporter.record_read();
        }
        assert_eq!(reporter.position(), UPDATE_INTERVAL + 10);
        reporter.finish();
        assert_eq!(reporter.position(), UPDATE_INTERVAL + 10);
    }
}
