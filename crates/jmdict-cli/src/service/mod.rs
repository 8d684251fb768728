//! Service module

pub mod runner;

pub use runner::run;
