//! Ctrl+C handling
//!
//! An interrupt stops reading and flushes what was already emitted. Records
//! still buffered in the shuffler are dropped, so the output is a clean,
//! incomplete prefix of a shuffle.

use crate::input::InputEvent;
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

/// Shared interrupt flag
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Create an untriggered flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the run as interrupted
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether an interrupt was received
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Route Ctrl+C to this flag, waking the shuffling loop through `wake`
    ///
    /// May only be installed once per process.
    pub fn install(&self, wake: SyncSender<InputEvent>) -> Result<()> {
        let interrupt = self.clone();
        ctrlc::set_handler(move || {
            interrupt.trigger();
            // A full queue means the loop is busy and will see the flag.
            let _ = wake.try_send(InputEvent::Interrupted);
        })
        .context("Failed to install Ctrl+C handler")
    }
}
