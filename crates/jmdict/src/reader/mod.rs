//! reader module
pub mod record_reader;

/// Re-exports
pub use record_reader::{ENTRY_CLOSE, ENTRY_OPEN, Record, RecordReader, text_lines};
