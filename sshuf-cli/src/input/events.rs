//! Input events delivered from the reader thread

use super::{InputSource, RecordReader};
use anyhow::Context;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

/// Records queued between the reader thread and the shuffling loop
pub const EVENT_QUEUE_LEN: usize = 1024;

/// One step of input, in arrival order
#[derive(Debug)]
pub enum InputEvent {
    /// A new source is being read
    SourceStarted(String),
    /// One record, delimiter stripped
    Record(Vec<u8>),
    /// Reading failed; no further events follow
    Failed(anyhow::Error),
    /// The user asked to stop
    Interrupted,
    /// Every source was read to the end
    Finished,
}

/// Bounded channel carrying [`InputEvent`]s
pub fn channel() -> (SyncSender<InputEvent>, Receiver<InputEvent>) {
    mpsc::sync_channel(EVENT_QUEUE_LEN)
}

/// Read every source on a background thread, sending one event per record
///
/// Reading happens off the shuffling thread so an interrupt can be noticed
/// while a read is blocked. The thread stops early once the receiver is gone.
pub fn spawn_reader(
    sources: Vec<InputSource>,
    buffer_size: usize,
    delimiter: u8,
    events: SyncSender<InputEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        for source in sources {
            let name = source.name();
            if events.send(InputEvent::SourceStarted(name.clone())).is_err() {
                return;
            }

            let reader = match source.open(buffer_size) {
                Ok(reader) => reader,
                Err(err) => {
                    let _ = events.send(InputEvent::Failed(err));
                    return;
                }
            };

            for record in RecordReader::new(reader, delimiter) {
                match record.with_context(|| format!("Failed to read from {name}")) {
                    Ok(record) => {
                        if events.send(InputEvent::Record(record)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        let _ = events.send(InputEvent::Failed(err));
                        return;
                    }
                }
            }
        }
        let _ = events.send(InputEvent::Finished);
    })
}
