//! Run summary model

use std::path::PathBuf;

use jmdict::BuildReport;
use jmdict::dictionary::DictionaryStats;
use serde::Serialize;

/// Summary printed after a successful run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
  /// Dictionary statistics
  pub stats: DictionaryStats,
  /// Build report
  pub report: BuildReport,
  /// Files written (empty without an output prefix)
  pub written: Vec<PathBuf>,
  /// Elapsed time (milliseconds)
  pub elapsed_ms: u64,
}
