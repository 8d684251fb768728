//! Build-and-export run

use std::time::Instant;

use jmdict::{JmdictConfig, JmdictService};
use tracing::info;

use crate::cli::Args;
use crate::errors::{CliError, Result};
use crate::export::write_exports;
use crate::models::RunSummary;

/// Builds the dictionary and, with an output prefix, writes every export
///
/// Nothing is written unless the whole build succeeds.
///
/// # Errors
/// - Input path missing or not a file
/// - Invalid configuration
/// - Parse failure of the input
/// - Output write failure
pub fn run(args: &Args, config: &JmdictConfig) -> Result<RunSummary> {
  let start = Instant::now();

  if !args.input.is_file() {
    return Err(CliError::input_not_found(&args.input));
  }

  let service = JmdictService::load(config, &args.input)?;
  let stats = service.dictionary().stats();
  info!(
    words = stats.word_count,
    keys = stats.key_count,
    "Dictionary ready"
  );

  let written = match args.output_prefix.as_deref() {
    Some(prefix) => write_exports(&service, &args.out_dir, prefix)?.all(),
    None => Vec::new(),
  };

  Ok(RunSummary {
    stats,
    report: service.report().clone(),
    written,
    elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
  })
}
