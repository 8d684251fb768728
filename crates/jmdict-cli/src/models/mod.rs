//! Models module

pub mod summary;

pub use summary::RunSummary;
