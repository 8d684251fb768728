//! decoder module
pub mod entry_decoder;

/// Re-exports
pub use entry_decoder::{DecodeDiagnostics, EntryDecoder, decode_entry};
