//! Config loading from a TOML file and environment variables

use std::path::Path;
use std::str::FromStr;

use jmdict::{JmdictConfig, LogLevel};

use super::constants::{ENV_LOG_LEVEL, ENV_MIN_WORD_LENGTH};
use crate::errors::{CliError, Result};

/// Loads the configuration
///
/// Reads `path` when given (defaults otherwise), applies the `JMDICT_*`
/// environment overrides and validates the result.
///
/// # Errors
/// Returns a config error if the file cannot be read or parsed, an override
/// value is invalid, or validation fails
pub fn load_config(path: Option<&Path>) -> Result<JmdictConfig> {
  let config = match path {
    Some(path) => JmdictConfig::from_path(path).map_err(|e| CliError::config(e.to_string()))?,
    None => JmdictConfig::default(),
  };

  let config = apply_overrides(config, |name| std::env::var(name).ok())?;
  config.validate().map_err(|e| CliError::config(e.to_string()))?;
  Ok(config)
}

/// Applies overrides looked up through `lookup`
///
/// Takes the lookup as a function so tests do not have to mutate the process
/// environment (`set_var` / `remove_var` are unsafe in Rust 2024).
///
/// # Errors
/// Returns a config error if an override value cannot be parsed
pub fn apply_overrides<F>(mut config: JmdictConfig, lookup: F) -> Result<JmdictConfig>
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(value) = lookup(ENV_MIN_WORD_LENGTH) {
    config.parse.min_word_length = value.trim().parse().map_err(|_| {
      CliError::config(format!("{ENV_MIN_WORD_LENGTH} must be a positive integer: {value:?}"))
    })?;
  }

  if let Some(value) = lookup(ENV_LOG_LEVEL) {
    config.logging.level = LogLevel::from_str(&value).map_err(CliError::config)?;
  }

  Ok(config)
}
