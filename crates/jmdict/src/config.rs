// crates/jmdict/src/config.rs

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::dictionary::SenseFilter;
use crate::errors::ConfigError;
use crate::kana::{BannedCharacters, LONG_VOWEL_MARK};
use crate::models::{MiscTag, Vocabulary};

/// Default minimum reading length (in characters).
pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;

/// Misc codes rejected by the default sense filter: archaic, obsolete, rare,
/// slang registers, vulgar terms and every proper-noun class.
pub const DEFAULT_BLOCKED_MISC: &[&str] = &[
  "arch", "obs", "rare", "sl", "net-sl", "m-sl", "vulg", "X", "person", "place", "surname",
  "given", "company", "organization", "product", "work", "station", "ship", "group", "char",
  "creat", "dei", "ev", "fict", "leg", "myth", "obj", "relig", "serv", "doc", "unclass",
];

/// Top-level configuration for jmdict.
///
/// Every section and field has a default, so an empty TOML document is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JmdictConfig {
  /// [parse] section
  pub parse: ParseConfig,
  /// [filter] section
  pub filter: FilterConfig,
  /// [logging] section
  pub logging: LoggingConfig,
}

/// [parse] section configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
  /// Readings shorter than this (in characters) are skipped
  pub min_word_length: usize,
  /// Readings containing any of these characters are skipped
  pub banned_characters: Vec<String>,
}

impl Default for ParseConfig {
  fn default() -> Self {
    Self {
      min_word_length: DEFAULT_MIN_WORD_LENGTH,
      banned_characters: vec!["ゐ".to_string(), "ゑ".to_string(), LONG_VOWEL_MARK.to_string()],
    }
  }
}

/// [filter] section configuration.
///
/// Drives the sense predicate used for the "common words" export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
  /// Reject senses tagged with any dialect
  pub reject_dialects: bool,
  /// Reject senses carrying any of these misc codes
  pub blocked_misc: Vec<String>,
}

impl Default for FilterConfig {
  fn default() -> Self {
    Self {
      reject_dialects: true,
      blocked_misc: DEFAULT_BLOCKED_MISC.iter().map(|s| s.to_string()).collect(),
    }
  }
}

/// [logging] section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level: "trace" | "debug" | "info" | "warn" | "error"
  pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// trace
  Trace,

  /// debug
  Debug,

  /// info
  #[default]
  Info,

  /// warn
  Warn,

  ///error
  Error,
}

impl LogLevel {
  /// Directive string understood by `tracing` filters.
  pub fn as_str(&self) -> &'static str {
    match self {
      LogLevel::Trace => "trace",
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

impl std::str::FromStr for LogLevel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "trace" => Ok(Self::Trace),
      "debug" => Ok(Self::Debug),
      "info" => Ok(Self::Info),
      "warn" => Ok(Self::Warn),
      "error" => Ok(Self::Error),
      _ => Err(format!(
        "Unknown log level: {s}. Valid values: trace, debug, info, warn, error"
      )),
    }
  }
}

// ===== Loading =====

impl JmdictConfig {
  /// Parses a TOML document.
  ///
  /// Does not validate; call [`validate`](Self::validate) afterwards.
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::InvalidToml {
      reason: e.to_string(),
    })
  }

  /// Reads and parses a TOML configuration file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })?;
    Self::from_toml_str(&text)
  }
}

// ===== Accessor Methods =====

impl JmdictConfig {
  /// Returns the minimum reading length.
  pub fn min_word_length(&self) -> usize {
    self.parse.min_word_length
  }

  /// Returns the banned-character predicate.
  ///
  /// Entries that are not a single character are ignored here; `validate` rejects them.
  pub fn banned_characters(&self) -> BannedCharacters {
    BannedCharacters::new(self.parse.banned_characters.iter().filter_map(|s| single_char(s)))
  }

  /// Returns the sense predicate for the "common words" view.
  ///
  /// Unknown misc codes are ignored here; `validate` rejects them.
  pub fn sense_filter(&self) -> SenseFilter {
    let blocked: BTreeSet<MiscTag> =
      self.filter.blocked_misc.iter().filter_map(|code| MiscTag::from_code(code)).collect();
    SenseFilter::new(self.filter.reject_dialects, blocked)
  }

  /// Returns the log level.
  pub fn log_level(&self) -> LogLevel {
    self.logging.level
  }

  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `parse.min_word_length` >= 1
  /// - every `parse.banned_characters` entry is exactly one character
  /// - `parse.banned_characters` has no duplicates
  /// - every `filter.blocked_misc` entry is a known misc code
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` for the first failing item.
  pub fn validate(&self) -> Result<(), ConfigError> {
    // parse.min_word_length >= 1
    if self.parse.min_word_length < 1 {
      return Err(ConfigError::InvalidMinWordLength {
        actual: self.parse.min_word_length,
      });
    }

    // banned characters are single characters without duplicates
    let mut seen = BTreeSet::new();
    for value in &self.parse.banned_characters {
      let c = single_char(value).ok_or_else(|| ConfigError::InvalidBannedCharacter {
        value: value.clone(),
      })?;
      if !seen.insert(c) {
        return Err(ConfigError::DuplicateBannedCharacter { value: c });
      }
    }

    // blocked misc codes exist in the vocabulary
    if let Some(code) = self.filter.blocked_misc.iter().find(|code| MiscTag::from_code(code).is_none())
    {
      return Err(ConfigError::UnknownBlockedMisc { code: code.clone() });
    }

    Ok(())
  }
}

fn single_char(value: &str) -> Option<char> {
  let mut chars = value.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) => Some(c),
    _ => None,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
