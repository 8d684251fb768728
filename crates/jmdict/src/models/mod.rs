//! models module
pub mod model_definition;
pub mod vocabulary;

/// Re-exports
pub use model_definition::{DictWord, Entry, KANJI_SEPARATOR, Sense};
pub use vocabulary::{Dialect, Field, MiscTag, TagCategory, Vocabulary};
