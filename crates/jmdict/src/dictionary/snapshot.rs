//! Versioned JSON and binary snapshots of a [`JMDict`].
//!
//! Both encodings carry the same schema: a format version followed by the
//! dictionary itself, tags written as their entity codes.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::dictionary::JMDict;
use crate::errors::SnapshotError;

/// Schema version written by this crate and the only one it reads back.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
  format_version: u32,
  dictionary: &'a JMDict,
}

/// Decoded snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
  /// Schema version
  pub format_version: u32,
  /// Dictionary payload
  pub dictionary: JMDict,
}

impl Snapshot {
  fn into_checked(self) -> Result<JMDict, SnapshotError> {
    if self.format_version != SNAPSHOT_FORMAT_VERSION {
      return Err(SnapshotError::UnsupportedVersion {
        found: self.format_version,
        expected: SNAPSHOT_FORMAT_VERSION,
      });
    }
    Ok(self.dictionary)
  }
}

fn wrap(dictionary: &JMDict) -> SnapshotRef<'_> {
  SnapshotRef {
    format_version: SNAPSHOT_FORMAT_VERSION,
    dictionary,
  }
}

/// Writes a pretty-printed JSON snapshot.
pub fn write_json<W: Write>(dictionary: &JMDict, mut writer: W) -> Result<(), SnapshotError> {
  serde_json::to_writer_pretty(&mut writer, &wrap(dictionary))?;
  writer.flush()?;
  Ok(())
}

/// Reads a JSON snapshot, rejecting other schema versions.
pub fn read_json<R: Read>(reader: R) -> Result<JMDict, SnapshotError> {
  let snapshot: Snapshot = serde_json::from_reader(reader)?;
  snapshot.into_checked()
}

/// Writes a postcard-encoded binary snapshot.
pub fn write_binary<W: Write>(dictionary: &JMDict, mut writer: W) -> Result<(), SnapshotError> {
  let bytes = postcard::to_stdvec(&wrap(dictionary))?;
  writer.write_all(&bytes)?;
  writer.flush()?;
  Ok(())
}

/// Decodes a binary snapshot, rejecting other schema versions.
pub fn read_binary(bytes: &[u8]) -> Result<JMDict, SnapshotError> {
  let snapshot: Snapshot = postcard::from_bytes(bytes)?;
  snapshot.into_checked()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
