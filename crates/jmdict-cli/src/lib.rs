//! jmdict-cli crate
//!
//! Command-line front end that builds a dictionary from a JMdict file and
//! writes its snapshots and text views.
//!
//! ## Usage Example
//! ```bash
//! jmdict-parse JMdict_e jmdict --out-dir out
//! # out/jmdict.json, out/jmdict.bin, out/jmdict-keys.txt,
//! # out/jmdict-words.txt, out/jmdict-common.txt
//! ```
//!
//! `RUST_LOG`, `JMDICT_LOG_LEVEL` and `JMDICT_MIN_WORD_LENGTH` are read from the environment.

pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod models;
pub mod service;

pub use cli::Args;
pub use config::load_config;
pub use errors::{CliError, CliErrorKind};
pub use models::RunSummary;
pub use service::run;
