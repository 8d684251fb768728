//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_OUT_DIR;

/// Builds a kana-keyed dictionary from a JMdict file
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[clap(name = "jmdict-parse", version)]
pub struct Args {
  /// JMdict source file (e.g. JMdict_e)
  pub input: PathBuf,

  /// Output file name prefix; without it only statistics are printed
  pub output_prefix: Option<String>,

  /// TOML configuration file
  #[clap(long, value_name = "TOML")]
  pub config: Option<PathBuf>,

  /// Directory the output files are written to
  #[clap(long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
  pub out_dir: PathBuf,
}
