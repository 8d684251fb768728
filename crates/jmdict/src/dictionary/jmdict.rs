//! The built dictionary: homonym lists under canonical keys plus tag frequencies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kana::canonicalize;
use crate::models::{Dialect, DictWord, Field, MiscTag, Sense, Vocabulary};

/// Number of entries per category reported by [`JMDict::stats`].
pub const TOP_TAGS: usize = 5;

/// Dictionary index keyed by canonical reading.
///
/// Built once by the index builder and read-only afterwards. Every word stored
/// under a key canonicalizes to that key; homonyms keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JMDict {
  words: BTreeMap<String, Vec<DictWord>>,
  dialectal_count: BTreeMap<Dialect, usize>,
  field_count: BTreeMap<Field, usize>,
  misc_count: BTreeMap<MiscTag, usize>,
}

/// Frequency of one tag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
  /// Entity code (`ksb`, `comp`, ...)
  pub code: String,
  /// Display name
  pub name: String,
  /// Number of retained senses carrying the tag
  pub count: usize,
}

/// Summary printed after a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryStats {
  /// Number of stored words
  pub word_count: usize,
  /// Number of distinct canonical keys
  pub key_count: usize,
  /// Most frequent dialect tags
  pub top_dialects: Vec<TagCount>,
  /// Most frequent field tags
  pub top_fields: Vec<TagCount>,
  /// Most frequent misc tags
  pub top_misc: Vec<TagCount>,
}

impl JMDict {
  /// Empty dictionary.
  pub fn new() -> Self {
    Self::default()
  }

  /// All homonym lists by canonical key.
  pub fn words(&self) -> &BTreeMap<String, Vec<DictWord>> {
    &self.words
  }

  /// Homonyms stored under an exact canonical key.
  pub fn get(&self, key: &str) -> Option<&[DictWord]> {
    self.words.get(key).map(Vec::as_slice)
  }

  /// Homonyms for a kana query in either script, small or full forms.
  ///
  /// Returns an empty slice when nothing matches.
  pub fn lookup(&self, query: &str) -> &[DictWord] {
    self.get(&canonicalize(query)).unwrap_or(&[])
  }

  /// Number of stored words (homonyms counted separately).
  pub fn word_count(&self) -> usize {
    self.words.values().map(Vec::len).sum()
  }

  /// Number of distinct canonical keys.
  pub fn key_count(&self) -> usize {
    self.words.len()
  }

  /// Whether no word is stored.
  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  /// Per-dialect sense counts.
  pub fn dialectal_count(&self) -> &BTreeMap<Dialect, usize> {
    &self.dialectal_count
  }

  /// Per-field sense counts.
  pub fn field_count(&self) -> &BTreeMap<Field, usize> {
    &self.field_count
  }

  /// Per-misc-tag sense counts.
  pub fn misc_count(&self) -> &BTreeMap<MiscTag, usize> {
    &self.misc_count
  }

  /// Word and key counts plus the most frequent tags of each category.
  pub fn stats(&self) -> DictionaryStats {
    DictionaryStats {
      word_count: self.word_count(),
      key_count: self.key_count(),
      top_dialects: top_tags(&self.dialectal_count),
      top_fields: top_tags(&self.field_count),
      top_misc: top_tags(&self.misc_count),
    }
  }

  /// Appends a word under `key`, after any existing homonyms.
  pub(crate) fn insert(&mut self, key: String, word: DictWord) {
    self.words.entry(key).or_default().push(word);
  }

  /// Adds the tags of each sense to the category counts.
  pub(crate) fn record_sense_tags<'a>(&mut self, senses: impl IntoIterator<Item = &'a Sense>) {
    for sense in senses {
      for dialect in &sense.dialects {
        *self.dialectal_count.entry(*dialect).or_default() += 1;
      }
      for field in &sense.fields {
        *self.field_count.entry(*field).or_default() += 1;
      }
      for misc in &sense.misc {
        *self.misc_count.entry(*misc).or_default() += 1;
      }
    }
  }
}

fn top_tags<V: Vocabulary>(counts: &BTreeMap<V, usize>) -> Vec<TagCount> {
  let mut ranked: Vec<(&V, &usize)> = counts.iter().collect();
  // Stable sort keeps declaration order among equal counts.
  ranked.sort_by(|a, b| b.1.cmp(a.1));
  ranked
    .into_iter()
    .take(TOP_TAGS)
    .map(|(tag, count)| TagCount {
      code: tag.code().to_string(),
      name: tag.name().to_string(),
      count: *count,
    })
    .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
