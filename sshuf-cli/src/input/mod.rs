//! Input handling module

pub mod events;
pub mod record_reader;
pub mod source;

pub use events::{spawn_reader, InputEvent};
pub use record_reader::RecordReader;
pub use source::{resolve_inputs, InputSource};
