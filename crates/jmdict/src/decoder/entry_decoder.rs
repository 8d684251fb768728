//! Decoding of one `<entry>` record into normalized [`Entry`] values.
//!
//! A record yields one `Entry` per distinct hiragana reading. Each carries the
//! kanji spellings its reading applies to and the senses of the whole record.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::errors::{MarkupError, VocabularyError};
use crate::kana::{is_katakana, sort_unique, strip_interpunct, to_hiragana};
use crate::markup::{extract, extract_single, has_element, unescape_entities};
use crate::models::{Dialect, Entry, Field, MiscTag, Sense, TagCategory, Vocabulary};

/// Non-fatal findings collected while decoding records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeDiagnostics {
  /// Tag tokens with no controlled-vocabulary member, per category
  pub missing_tags: BTreeMap<TagCategory, BTreeSet<String>>,
  /// Senses carrying more than one `<s_inf>` note (only the first is kept)
  pub secondary_notes: usize,
  /// `<r_ele>` blocks without a `<reb>` (skipped)
  pub readings_without_spelling: usize,
  /// Hiragana readings marked `<re_nokanji/>` (not emitted)
  pub nokanji_readings: usize,
}

impl DecodeDiagnostics {
  /// Records a missing vocabulary token. Returns `true` the first time a token is seen.
  pub fn record_missing(&mut self, error: VocabularyError) -> bool {
    match error {
      VocabularyError::MissingControlledVocabulary { category, token } => {
        self.missing_tags.entry(category).or_default().insert(token)
      }
    }
  }

  /// Total number of distinct missing tokens across categories.
  pub fn missing_tag_count(&self) -> usize {
    self.missing_tags.values().map(BTreeSet::len).sum()
  }
}

/// Stateful decoder that accumulates [`DecodeDiagnostics`] across records.
#[derive(Debug, Default)]
pub struct EntryDecoder {
  diagnostics: DecodeDiagnostics,
}

/// One `<r_ele>` after pass one: raw reading and the spellings it applies to.
struct RawReading {
  reading: String,
  spellings: Vec<String>,
}

impl EntryDecoder {
  /// Creates a decoder with empty diagnostics.
  pub fn new() -> Self {
    Self::default()
  }

  /// Diagnostics gathered so far.
  pub fn diagnostics(&self) -> &DecodeDiagnostics {
    &self.diagnostics
  }

  /// Consumes the decoder, returning its diagnostics.
  pub fn into_diagnostics(self) -> DecodeDiagnostics {
    self.diagnostics
  }

  /// Decodes the text of one record.
  ///
  /// # Errors
  /// - [`MarkupError::MultipleSingleValueTag`] when a `<r_ele>` holds more than one `<reb>`
  /// - [`MarkupError::MalformedMarkup`] when any element's open/close markers do not pair up
  pub fn decode(&mut self, block: &str) -> Result<Vec<Entry>, MarkupError> {
    let kanji = decode_kanji(block)?;
    let raw_readings = self.decode_readings(block, &kanji)?;
    let senses: Arc<[Sense]> = self.decode_senses(block)?.into();

    let entries: Vec<Entry> = merge_by_hiragana(raw_readings)
      .into_iter()
      .map(|(reading, spellings)| Entry {
        reading,
        kanji: sort_unique(spellings),
        senses: Arc::clone(&senses),
      })
      .collect();

    trace!(
      kanji = kanji.len(),
      entries = entries.len(),
      senses = senses.len(),
      "Decoded record"
    );
    Ok(entries)
  }

  /// Pass one: raw (script-mixed) readings with their resolved spelling sets.
  fn decode_readings(
    &mut self,
    block: &str,
    kanji: &[String],
  ) -> Result<Vec<RawReading>, MarkupError> {
    let mut readings = Vec::new();

    for r_ele in extract("r_ele", block)? {
      let Some(reb) = extract_single("reb", &r_ele)? else {
        self.diagnostics.readings_without_spelling += 1;
        warn!(block = %r_ele.trim(), "Reading element without <reb>, skipped");
        continue;
      };
      let reading = strip_interpunct(reb.trim());
      let restrictions: Vec<String> =
        extract("re_restr", &r_ele)?.into_iter().map(|r| r.trim().to_string()).collect();
      let katakana = is_katakana(&reading);

      let spellings = if has_element("re_nokanji", &r_ele) {
        if !katakana {
          self.diagnostics.nokanji_readings += 1;
          debug!(reading = %reading, "Reading is not a reading of the kanji forms, skipped");
          continue;
        }
        // katakana alias: every kanji form plus itself
        let mut spellings = kanji.to_vec();
        spellings.push(reading.clone());
        spellings
      } else if !restrictions.is_empty() {
        restrictions
      } else if kanji.is_empty() && katakana {
        vec![reading.clone()]
      } else {
        kanji.to_vec()
      };

      readings.push(RawReading { reading, spellings });
    }

    Ok(readings)
  }

  fn decode_senses(&mut self, block: &str) -> Result<Vec<Sense>, MarkupError> {
    let mut senses = Vec::new();

    for sense_block in extract("sense", block)? {
      let meanings = extract("gloss", &sense_block)?
        .iter()
        .map(|gloss| unescape_entities(gloss.trim()).into_owned())
        .collect();

      let mut notes = extract("s_inf", &sense_block)?;
      if notes.len() > 1 {
        self.diagnostics.secondary_notes += 1;
        warn!(notes = ?notes, "Sense has more than one note, keeping the first");
      }
      let info = if notes.is_empty() {
        None
      } else {
        Some(unescape_entities(notes.swap_remove(0).trim()).into_owned())
      };

      senses.push(Sense {
        dialects: self.decode_tags::<Dialect>(&sense_block)?,
        fields: self.decode_tags::<Field>(&sense_block)?,
        misc: self.decode_tags::<MiscTag>(&sense_block)?,
        info,
        meanings,
      });
    }

    Ok(senses)
  }

  /// Tags of one category; unknown tokens are reported and dropped.
  fn decode_tags<V: Vocabulary>(&mut self, sense_block: &str) -> Result<BTreeSet<V>, MarkupError> {
    let category = V::CATEGORY;
    let mut tags = BTreeSet::new();
    for raw in extract(category.element(), sense_block)? {
      let token = strip_entity_markers(raw.trim());
      match V::parse_code(token) {
        Ok(tag) => {
          tags.insert(tag);
        }
        Err(error) => {
          if self.diagnostics.record_missing(error) {
            warn!(category = %category, token, "Unknown tag, dropped");
          }
        }
      }
    }
    Ok(tags)
  }
}

/// Decodes one record with a throwaway decoder.
pub fn decode_entry(block: &str) -> Result<Vec<Entry>, MarkupError> {
  EntryDecoder::new().decode(block)
}

/// Flat list of every `<keb>` in the record.
fn decode_kanji(block: &str) -> Result<Vec<String>, MarkupError> {
  let mut kanji = Vec::new();
  for k_ele in extract("k_ele", block)? {
    kanji.extend(extract("keb", &k_ele)?.into_iter().map(|keb| keb.trim().to_string()));
  }
  Ok(kanji)
}

/// Pass two: convert readings to hiragana and merge spelling sets of readings
/// that become identical, keeping first-seen order.
fn merge_by_hiragana(raw_readings: Vec<RawReading>) -> Vec<(String, Vec<String>)> {
  let mut merged: Vec<(String, Vec<String>)> = Vec::with_capacity(raw_readings.len());
  for RawReading { reading, spellings } in raw_readings {
    let hiragana = to_hiragana(&reading);
    match merged.iter_mut().find(|(existing, _)| *existing == hiragana) {
      Some((_, existing)) => existing.extend(spellings),
      None => merged.push((hiragana, spellings)),
    }
  }
  merged
}

/// `&ksb;` → `ksb`: drops the first and last character.
fn strip_entity_markers(token: &str) -> &str {
  let mut chars = token.char_indices();
  let start = chars.next().map(|(i, c)| i + c.len_utf8());
  let end = chars.next_back().map(|(i, _)| i);
  match (start, end) {
    (Some(start), Some(end)) => &token[start..end],
    _ => "",
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn entry_block(body: &str) -> String {
    format!("<entry>\n<ent_seq>1000000</ent_seq>\n{body}\n</entry>")
  }

  fn readings(entries: &[Entry]) -> Vec<(&str, Vec<&str>)> {
    entries
      .iter()
      .map(|e| (e.reading.as_str(), e.kanji.iter().map(String::as_str).collect()))
      .collect()
  }

  // ─── Restriction resolution ───────────────────────────────────────────────

  #[test]
  fn unrestricted_reading_gets_every_kanji() {
    let block = entry_block(
      "<k_ele>\n<keb>A</keb>\n</k_ele>\n<k_ele>\n<keb>B</keb>\n</k_ele>\n\
       <r_ele>\n<reb>いち</reb>\n</r_ele>\n\
       <r_ele>\n<reb>にい</reb>\n<re_restr>A</re_restr>\n</r_ele>\n\
       <sense>\n<gloss>x</gloss>\n</sense>",
    );
    let entries = decode_entry(&block).unwrap();
    assert_eq!(
      readings(&entries),
      vec![("いち", vec!["A", "B"]), ("にい", vec!["A"])]
    );
  }

  #[test]
  fn nokanji_hiragana_reading_is_excluded() {
    let block = entry_block(
      "<k_ele>\n<keb>明白</keb>\n</k_ele>\n\
       <r_ele>\n<reb>めいはく</reb>\n</r_ele>\n\
       <r_ele>\n<reb>あからさま</reb>\n<re_nokanji/>\n</r_ele>\n\
       <sense>\n<gloss>obvious</gloss>\n</sense>",
    );
    let mut decoder = EntryDecoder::new();
    let entries = decoder.decode(&block).unwrap();

    assert_eq!(readings(&entries), vec![("めいはく", vec!["明白"])]);
    assert_eq!(decoder.diagnostics().nokanji_readings, 1);
  }

  #[test]
  fn nokanji_katakana_reading_keeps_every_kanji() {
    let block = entry_block(
      "<k_ele>\n<keb>麺麭</keb>\n</k_ele>\n\
       <r_ele>\n<reb>パン</reb>\n<re_nokanji/>\n</r_ele>\n\
       <sense>\n<gloss>bread</gloss>\n</sense>",
    );
    let entries = decode_entry(&block).unwrap();
    assert_eq!(readings(&entries), vec![("ぱん", vec!["パン", "麺麭"])]);
  }

  #[test]
  fn kana_only_katakana_entry_spells_itself() {
    let block = entry_block("<r_ele>\n<reb>パン</reb>\n</r_ele>\n<sense>\n<gloss>bread</gloss>\n</sense>");
    let entries = decode_entry(&block).unwrap();
    assert_eq!(readings(&entries), vec![("ぱん", vec!["パン"])]);
  }

  #[test]
  fn readings_merging_after_conversion_union_their_kanji() {
    let block = entry_block(
      "<k_ele>\n<keb>A</keb>\n</k_ele>\n<k_ele>\n<keb>B</keb>\n</k_ele>\n\
       <r_ele>\n<reb>カナ</reb>\n<re_restr>B</re_restr>\n</r_ele>\n\
       <r_ele>\n<reb>かな</reb>\n<re_restr>A</re_restr>\n</r_ele>\n\
       <r_ele>\n<reb>べつ</reb>\n<re_restr>A</re_restr>\n</r_ele>\n\
       <sense>\n<gloss>x</gloss>\n</sense>",
    );
    let entries = decode_entry(&block).unwrap();
    assert_eq!(
      readings(&entries),
      vec![("かな", vec!["A", "B"]), ("べつ", vec!["A"])]
    );
  }

  #[test]
  fn interpunct_is_stripped_from_readings() {
    let block = entry_block("<r_ele>\n<reb>あい・うえ</reb>\n</r_ele>\n<sense>\n<gloss>x</gloss>\n</sense>");
    let entries = decode_entry(&block).unwrap();
    assert_eq!(entries[0].reading, "あいうえ");
  }

  #[test]
  fn repeated_reb_is_rejected() {
    let block = entry_block("<r_ele>\n<reb>あ</reb>\n<reb>い</reb>\n</r_ele>");
    let err = decode_entry(&block).unwrap_err();
    assert!(matches!(err, MarkupError::MultipleSingleValueTag { ref tag, .. } if tag == "reb"));
  }

  #[test]
  fn unbalanced_markup_is_rejected() {
    let block = entry_block("<r_ele>\n<reb>あ</reb>\n</r_ele>\n<sense>\n<gloss>x\n</sense>");
    let err = decode_entry(&block).unwrap_err();
    assert!(matches!(err, MarkupError::MalformedMarkup { ref tag, .. } if tag == "gloss"));
  }

  // ─── Senses ───────────────────────────────────────────────

  #[test]
  fn senses_are_shared_by_all_readings() {
    let block = entry_block(
      "<r_ele>\n<reb>ああ</reb>\n</r_ele>\n<r_ele>\n<reb>いい</reb>\n</r_ele>\n\
       <sense>\n<gloss>one</gloss>\n</sense>\n<sense>\n<gloss>two</gloss>\n</sense>",
    );
    let entries = decode_entry(&block).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].senses.len(), 2);
    assert!(Arc::ptr_eq(&entries[0].senses, &entries[1].senses));
  }

  #[test]
  fn sense_fields_are_decoded() {
    let block = entry_block(
      "<r_ele>\n<reb>おおきに</reb>\n</r_ele>\n\
       <sense>\n<pos>&int;</pos>\n<misc>&uk;</misc>\n<dial>&ksb;</dial>\n<field>&food;</field>\n\
       <s_inf>used in Kyoto too</s_inf>\n<gloss>thank you</gloss>\n\
       <gloss g_type=\"expl\">thanks &amp; more</gloss>\n</sense>",
    );
    let entries = decode_entry(&block).unwrap();
    let sense = &entries[0].senses[0];

    assert_eq!(sense.meanings, vec!["thank you", "thanks & more"]);
    assert_eq!(sense.info.as_deref(), Some("used in Kyoto too"));
    assert!(sense.dialects.contains(&Dialect::Kansai));
    assert!(sense.fields.contains(&Field::Food));
    assert!(sense.misc.contains(&MiscTag::UsuallyKana));
  }

  #[test]
  fn unknown_tags_are_reported_not_fatal() {
    let block = entry_block(
      "<r_ele>\n<reb>なにか</reb>\n</r_ele>\n\
       <sense>\n<dial>&zzz;</dial>\n<dial>&ksb;</dial>\n<misc>&nope;</misc>\n<gloss>x</gloss>\n</sense>\n\
       <sense>\n<dial>&zzz;</dial>\n<gloss>y</gloss>\n</sense>",
    );
    let mut decoder = EntryDecoder::new();
    let entries = decoder.decode(&block).unwrap();

    assert_eq!(entries[0].senses[0].dialects.len(), 1);
    assert!(entries[0].senses[0].misc.is_empty());

    let diagnostics = decoder.into_diagnostics();
    assert_eq!(diagnostics.missing_tag_count(), 2);
    assert!(diagnostics.missing_tags[&TagCategory::Dialect].contains("zzz"));
    assert!(diagnostics.missing_tags[&TagCategory::Misc].contains("nope"));
  }

  #[test]
  fn secondary_note_is_reported() {
    let block = entry_block(
      "<r_ele>\n<reb>なにか</reb>\n</r_ele>\n\
       <sense>\n<s_inf>first</s_inf>\n<s_inf>second</s_inf>\n<gloss>x</gloss>\n</sense>",
    );
    let mut decoder = EntryDecoder::new();
    let entries = decoder.decode(&block).unwrap();

    assert_eq!(entries[0].senses[0].info.as_deref(), Some("first"));
    assert_eq!(decoder.diagnostics().secondary_notes, 1);
  }

  #[test]
  fn reading_without_reb_is_skipped() {
    let block = entry_block(
      "<r_ele>\n<re_pri>ichi1</re_pri>\n</r_ele>\n<r_ele>\n<reb>ある</reb>\n</r_ele>",
    );
    let mut decoder = EntryDecoder::new();
    let entries = decoder.decode(&block).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(decoder.diagnostics().readings_without_spelling, 1);
  }

  // ─── strip_entity_markers ───────────────────────────────────────────────

  #[test]
  fn strip_entity_markers_drops_first_and_last() {
    assert_eq!(strip_entity_markers("&ksb;"), "ksb");
    assert_eq!(strip_entity_markers("&;"), "");
    assert_eq!(strip_entity_markers("x"), "");
    assert_eq!(strip_entity_markers(""), "");
  }
}
