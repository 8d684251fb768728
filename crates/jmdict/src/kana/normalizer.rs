//! Kana script conversion and canonical-key normalization.

use std::collections::BTreeSet;

/// Lengthening mark (chōonpu).
pub const LONG_VOWEL_MARK: char = 'ー';

/// Interpunct joining the parts of compound readings.
pub const INTERPUNCT: char = '・';

/// Offset between a katakana letter and its hiragana counterpart.
const SCRIPT_OFFSET: u32 = 0x60;

/// Small-form kana and the full-size letter each collapses to.
const SMALL_FORMS: [(char, char); 10] = [
  ('ぁ', 'あ'),
  ('ぃ', 'い'),
  ('ぅ', 'う'),
  ('ぇ', 'え'),
  ('ぉ', 'お'),
  ('っ', 'つ'),
  ('ゃ', 'や'),
  ('ゅ', 'ゆ'),
  ('ょ', 'よ'),
  ('ゎ', 'わ'),
];

/// Converts one katakana character to hiragana; anything else is returned unchanged.
///
/// The lengthening mark has no hiragana counterpart and is always kept as is.
pub fn hiragana_char(c: char) -> char {
  match c {
    LONG_VOWEL_MARK => c,
    'ァ'..='ヶ' | 'ヽ'..='ヾ' => shift(c, -1),
    _ => c,
  }
}

/// Converts one hiragana character to katakana; anything else is returned unchanged.
pub fn katakana_char(c: char) -> char {
  match c {
    'ぁ'..='ゖ' | 'ゝ'..='ゞ' => shift(c, 1),
    _ => c,
  }
}

/// Converts katakana to hiragana (the base syllabary).
///
/// The lengthening mark is preserved verbatim: `シュー` becomes `しゅー`, not `しゅう`.
/// Idempotent.
pub fn to_hiragana(s: &str) -> String {
  s.chars().map(hiragana_char).collect()
}

/// Converts hiragana to katakana.
pub fn to_katakana(s: &str) -> String {
  s.chars().map(katakana_char).collect()
}

/// Collapses small-form kana to full size and drops the interpunct.
///
/// This is the "oomoji" form under which homonyms are grouped. Several
/// spellings may collapse to the same key (`きゃく` and `きやく`). Idempotent.
pub fn collapse_small_forms(s: &str) -> String {
  s.chars()
    .filter(|&c| c != INTERPUNCT)
    .map(|c| {
      SMALL_FORMS
        .iter()
        .find(|(small, _)| *small == c)
        .map_or(c, |(_, full)| *full)
    })
    .collect()
}

/// Canonical index key of a reading in either script.
pub fn canonicalize(reading: &str) -> String {
  collapse_small_forms(&to_hiragana(reading))
}

/// Removes every interpunct from a reading.
pub fn strip_interpunct(reading: &str) -> String {
  reading.chars().filter(|&c| c != INTERPUNCT).collect()
}

/// Whether the character is a katakana letter (the lengthening mark and interpunct included).
pub fn is_katakana_char(c: char) -> bool {
  matches!(c, 'ァ'..='ヺ' | 'ー' | '・' | 'ヽ'..='ヾ')
}

/// Whether the reading is written entirely in katakana.
pub fn is_katakana(reading: &str) -> bool {
  !reading.is_empty()
    && reading.chars().all(is_katakana_char)
    && reading.chars().any(|c| c != LONG_VOWEL_MARK && c != INTERPUNCT)
}

/// Characters whose presence excludes a reading from the index.
///
/// Defaults to the obsolete syllables `ゐ`, `ゑ` and the lengthening mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannedCharacters {
  chars: BTreeSet<char>,
}

impl BannedCharacters {
  /// Builds the set from individual characters.
  pub fn new<I: IntoIterator<Item = char>>(chars: I) -> Self {
    Self {
      chars: chars.into_iter().collect(),
    }
  }

  /// First banned character found in `reading`, if any.
  pub fn find(&self, reading: &str) -> Option<char> {
    reading.chars().find(|c| self.chars.contains(c))
  }

  /// Whether `reading` contains any banned character.
  pub fn matches(&self, reading: &str) -> bool {
    self.find(reading).is_some()
  }

  /// Number of banned characters.
  pub fn len(&self) -> usize {
    self.chars.len()
  }

  /// Whether nothing is banned.
  pub fn is_empty(&self) -> bool {
    self.chars.is_empty()
  }
}

impl Default for BannedCharacters {
  fn default() -> Self {
    Self::new(['ゐ', 'ゑ', LONG_VOWEL_MARK])
  }
}

fn shift(c: char, direction: i8) -> char {
  let code = c as u32;
  let shifted = if direction < 0 {
    code - SCRIPT_OFFSET
  } else {
    code + SCRIPT_OFFSET
  };
  char::from_u32(shifted).unwrap_or(c)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
