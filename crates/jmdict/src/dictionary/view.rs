//! Read-only projections of a built [`JMDict`].

use std::collections::{BTreeMap, BTreeSet};

use crate::dictionary::JMDict;
use crate::kana::compare;
use crate::models::{DictWord, Sense};

/// Separator placed between the definitions of one reading in [`JMDict::flatten`].
pub const DEFINITION_SEPARATOR: &str = " | ";

/// Separator between a reading and its definitions in [`JMDict::flatten`].
pub const READING_SEPARATOR: char = '\t';

impl JMDict {
  /// All keys in dictionary order.
  pub fn sorted_keys(&self) -> Vec<&str> {
    let mut keys: Vec<&str> = self.words().keys().map(String::as_str).collect();
    keys.sort_by(|a, b| compare(a, b));
    keys
  }

  /// One line per reading: `reading<TAB>definition | definition`.
  ///
  /// Keys are visited in dictionary order and the words under a key are grouped
  /// by reading. With a filter, senses it rejects are dropped, words left
  /// without senses are dropped, and readings or keys left empty produce no line.
  pub fn flatten(&self, filter: Option<&dyn Fn(&Sense) -> bool>) -> Vec<String> {
    let mut lines = Vec::new();

    for key in self.sorted_keys() {
      let Some(words) = self.get(key) else {
        continue;
      };

      let mut groups: BTreeMap<&str, Vec<&DictWord>> = BTreeMap::new();
      for word in words {
        groups.entry(word.reading.as_str()).or_default().push(word);
      }
      let mut readings: Vec<&str> = groups.keys().copied().collect();
      readings.sort_by(|a, b| compare(a, b));

      for reading in readings {
        let mut definitions: Vec<String> = groups[reading]
          .iter()
          .filter_map(|word| render(word, filter))
          .collect();
        if definitions.is_empty() {
          continue;
        }
        definitions.sort_by(|a, b| compare(a, b));
        lines.push(format!(
          "{reading}{READING_SEPARATOR}{}",
          definitions.join(DEFINITION_SEPARATOR)
        ));
      }
    }

    lines
  }

  /// New dictionary keeping only words with at least one sense accepted by `is_good`.
  ///
  /// Retained words keep all of their senses. Tag counts are recomputed over the
  /// retained words, once per source record.
  pub fn filter_useless_words(&self, is_good: impl Fn(&Sense) -> bool) -> JMDict {
    let mut filtered = JMDict::new();
    let mut counted_records = BTreeSet::new();

    for (key, words) in self.words() {
      for word in words {
        if !word.senses.iter().any(&is_good) {
          continue;
        }
        // words without a record index are counted individually
        if word.record.is_none_or(|record| counted_records.insert(record)) {
          filtered.record_sense_tags(&word.senses);
        }
        filtered.insert(key.clone(), word.clone());
      }
    }

    filtered
  }
}

/// Definition of `word` with filtered senses, or `None` when no sense survives.
fn render(word: &DictWord, filter: Option<&dyn Fn(&Sense) -> bool>) -> Option<String> {
  let Some(filter) = filter else {
    return Some(word.definition());
  };

  let senses: Vec<Sense> = word.senses.iter().filter(|sense| filter(sense)).cloned().collect();
  if senses.is_empty() {
    return None;
  }
  Some(DictWord::new(word.reading.clone(), word.kanji.clone(), senses).definition())
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
