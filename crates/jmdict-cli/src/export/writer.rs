//! Writes the dictionary snapshots and text views to disk

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use jmdict::JmdictService;
use jmdict::dictionary::{write_binary, write_json};
use tracing::{info, warn};

use crate::config::{
  BINARY_EXTENSION, COMMON_SUFFIX, JSON_EXTENSION, KEYS_SUFFIX, STAGING_PREFIX, WORDS_SUFFIX,
};
use crate::errors::{CliError, Result};

/// Output file locations for one prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
  /// `P.json`
  pub json: PathBuf,
  /// `P.bin`
  pub binary: PathBuf,
  /// `P-keys.txt`
  pub keys: PathBuf,
  /// `P-words.txt`
  pub words: PathBuf,
  /// `P-common.txt`
  pub common: PathBuf,
}

impl ExportPaths {
  /// Paths for `prefix` inside `out_dir`
  #[must_use]
  pub fn new(out_dir: &Path, prefix: &str) -> Self {
    Self {
      json: out_dir.join(format!("{prefix}.{JSON_EXTENSION}")),
      binary: out_dir.join(format!("{prefix}.{BINARY_EXTENSION}")),
      keys: out_dir.join(format!("{prefix}{KEYS_SUFFIX}")),
      words: out_dir.join(format!("{prefix}{WORDS_SUFFIX}")),
      common: out_dir.join(format!("{prefix}{COMMON_SUFFIX}")),
    }
  }

  /// Every path, in write order
  #[must_use]
  pub fn all(&self) -> Vec<PathBuf> {
    vec![
      self.json.clone(),
      self.binary.clone(),
      self.keys.clone(),
      self.words.clone(),
      self.common.clone(),
    ]
  }
}

/// Writes snapshots and views of a built dictionary
///
/// Files are written into a staging directory inside `out_dir` and moved into
/// place only once all of them succeeded, so a failed export leaves no output.
///
/// # Errors
/// Returns an IO error if the output directory or any file cannot be written
pub fn write_exports(service: &JmdictService, out_dir: &Path, prefix: &str) -> Result<ExportPaths> {
  fs::create_dir_all(out_dir).map_err(|e| CliError::export(out_dir, e))?;
  let staging = tempfile::Builder::new()
    .prefix(STAGING_PREFIX)
    .tempdir_in(out_dir)
    .map_err(|e| CliError::export(out_dir, e))?;

  let staged = ExportPaths::new(staging.path(), prefix);
  write_staged(service, &staged)?;

  let paths = ExportPaths::new(out_dir, prefix);
  publish(&staged, &paths)?;

  info!(out_dir = %out_dir.display(), prefix, "Exports written");
  Ok(paths)
}

fn write_staged(service: &JmdictService, staged: &ExportPaths) -> Result<()> {
  let dictionary = service.dictionary();

  let file = create(&staged.json)?;
  write_json(dictionary, file).map_err(|source| CliError::Snapshot {
    path: staged.json.clone(),
    source,
  })?;

  let file = create(&staged.binary)?;
  write_binary(dictionary, file).map_err(|source| CliError::Snapshot {
    path: staged.binary.clone(),
    source,
  })?;

  write_lines(&staged.keys, service.sorted_keys())?;
  write_lines(&staged.words, service.flatten_all())?;
  write_lines(&staged.common, service.flatten_common())?;
  Ok(())
}

/// Moves staged files into place; on failure removes the ones already moved.
fn publish(staged: &ExportPaths, paths: &ExportPaths) -> Result<()> {
  let mut published: Vec<PathBuf> = Vec::new();
  for (from, to) in staged.all().into_iter().zip(paths.all()) {
    if let Err(source) = fs::rename(&from, &to) {
      for path in &published {
        if let Err(error) = fs::remove_file(path) {
          warn!(path = %path.display(), %error, "Could not remove partial export");
        }
      }
      return Err(CliError::export(to, source));
    }
    published.push(to);
  }
  Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
  File::create(path).map(BufWriter::new).map_err(|e| CliError::export(path, e))
}

/// Writes lines joined by newlines
fn write_lines<S: AsRef<str>>(path: &Path, lines: Vec<S>) -> Result<()> {
  let text = lines.iter().map(|line| line.as_ref()).collect::<Vec<&str>>().join("\n");
  let mut out = create(path)?;
  out.write_all(text.as_bytes()).and_then(|()| out.flush()).map_err(|e| CliError::export(path, e))
}
