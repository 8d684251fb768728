//! Japanese-aware ordering for keys, readings and rendered definitions.
//!
//! Code-point order puts `ゔ` (U+3094) after `ん`. Dictionary order files it
//! right after its plain letter `う`, so the comparator uses explicit weights:
//! katakana folds onto hiragana, `ゔ`/`ヴ` sit between `う` and `ぇ`, and
//! remaining ties fall back to code-point order so the order is total.

use std::cmp::Ordering;

use crate::kana::normalizer::hiragana_char;

/// Primary collation weight of one character.
fn primary_weight(c: char) -> u32 {
  match hiragana_char(c) {
    'ゔ' => weight_of('う') + 1,
    folded => weight_of(folded),
  }
}

fn weight_of(c: char) -> u32 {
  (c as u32) * 4
}

/// Compares two strings in dictionary order.
pub fn compare(a: &str, b: &str) -> Ordering {
  a.chars()
    .map(primary_weight)
    .cmp(b.chars().map(primary_weight))
    .then_with(|| a.cmp(b))
}

/// Sorts strings in dictionary order and removes duplicates.
pub fn sort_unique(mut values: Vec<String>) -> Vec<String> {
  values.sort_by(|a, b| compare(a, b));
  values.dedup();
  values
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
