//! Data Model Definition
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::vocabulary::{Dialect, Field, MiscTag};

/// Separator placed between kanji spellings in [`DictWord::writing`].
pub const KANJI_SEPARATOR: &str = "、";

/// Separator placed between the glosses of one sense when rendering a definition.
pub const GLOSS_SEPARATOR: &str = ", ";

/// Separator placed between senses when rendering a definition.
pub const SENSE_SEPARATOR: &str = "; ";

/// One meaning-slot of a dictionary record.
///
/// Senses belong to the whole record, so every reading decoded from the same
/// `<entry>` shares the same senses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
  /// Regional dialects
  pub dialects: BTreeSet<Dialect>,

  /// Subject fields
  pub fields: BTreeSet<Field>,

  /// Usage / register flags
  pub misc: BTreeSet<MiscTag>,

  /// Free-text note (`<s_inf>`)
  pub info: Option<String>,

  /// Glosses, in source order
  pub meanings: Vec<String>,
}

impl Sense {
  /// Sense with the given glosses and no tags.
  pub fn new<I, S>(meanings: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      meanings: meanings.into_iter().map(Into::into).collect(),
      ..Self::default()
    }
  }

  /// Builder that adds one dialect tag
  #[must_use]
  pub fn with_dialect(mut self, dialect: Dialect) -> Self {
    self.dialects.insert(dialect);
    self
  }

  /// Builder that adds one field tag
  #[must_use]
  pub fn with_field(mut self, field: Field) -> Self {
    self.fields.insert(field);
    self
  }

  /// Builder that adds one misc tag
  #[must_use]
  pub fn with_misc(mut self, misc: MiscTag) -> Self {
    self.misc.insert(misc);
    self
  }

  /// Builder that sets the free-text note
  #[must_use]
  pub fn with_info(mut self, info: impl Into<String>) -> Self {
    self.info = Some(info.into());
    self
  }

  /// Glosses joined with [`GLOSS_SEPARATOR`].
  pub fn gloss(&self) -> String {
    self.meanings.join(GLOSS_SEPARATOR)
  }
}

/// Decoder output: one normalized reading of a record.
///
/// Transient; the index builder turns it into a [`DictWord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
  /// Reading, already converted to hiragana
  pub reading: String,

  /// Kanji spellings this reading applies to, deduplicated and collation-sorted
  pub kanji: Vec<String>,

  /// Senses of the source record (shared by every reading of the record)
  pub senses: Arc<[Sense]>,
}

/// A word stored in the dictionary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictWord {
  /// Reading
  pub reading: String,

  /// Kanji spellings (empty for kana-only words)
  pub kanji: Vec<String>,

  /// Senses
  pub senses: Vec<Sense>,

  /// 1-based index of the source record; words of one record share their senses
  #[serde(default)]
  pub record: Option<usize>,
}

impl DictWord {
  /// Constructor for DictWord
  pub fn new(reading: impl Into<String>, kanji: Vec<String>, senses: Vec<Sense>) -> Self {
    Self {
      reading: reading.into(),
      kanji,
      senses,
      record: None,
    }
  }

  /// Builder that sets the source record index
  #[must_use]
  pub fn with_record(mut self, record: usize) -> Self {
    self.record = Some(record);
    self
  }

  /// Kanji spellings joined with [`KANJI_SEPARATOR`], or the reading for kana-only words.
  pub fn writing(&self) -> String {
    if self.kanji.is_empty() {
      self.reading.clone()
    } else {
      self.kanji.join(KANJI_SEPARATOR)
    }
  }

  /// One-line rendering: `writing: gloss; gloss`.
  pub fn definition(&self) -> String {
    let senses: Vec<String> = self.senses.iter().map(Sense::gloss).collect();
    format!("{}: {}", self.writing(), senses.join(SENSE_SEPARATOR))
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
