//! export module
pub mod writer;

pub use writer::{ExportPaths, write_exports};
