// crates/jmdict/src/indexer/index_builder.rs

//! 辞書の構築
//!
//! 行ストリームを [`RecordReader`] でレコードに分割し、得られた [`Entry`] を
//! 正規化キーの下に [`DictWord`] として追加していきます。
//!
//! I/O（ファイルハンドルの確保）は [`build_from_path`] のみが行い、
//! [`build`] は行の列に対する決定的な畳み込みです。

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{DEFAULT_MIN_WORD_LENGTH, JmdictConfig};
use crate::dictionary::JMDict;
use crate::errors::{JmdictError, JmdictResult, ParseError};
use crate::indexer::report::BuildReport;
use crate::kana::{BannedCharacters, canonicalize, to_katakana};
use crate::models::{DictWord, Entry};
use crate::reader::{Record, RecordReader};

/// 構築時のフィルタ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
  /// これより短い（文字数）読みはスキップ
  pub min_word_length: usize,
  /// これらの文字を含む読みはスキップ
  pub banned: BannedCharacters,
}

impl BuildOptions {
  /// 設定から構築オプションを作る
  pub fn from_config(config: &JmdictConfig) -> Self {
    Self {
      min_word_length: config.min_word_length(),
      banned: config.banned_characters(),
    }
  }
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      min_word_length: DEFAULT_MIN_WORD_LENGTH,
      banned: BannedCharacters::default(),
    }
  }
}

/// レコード単位で辞書を組み立てるビルダー
#[derive(Debug)]
pub struct WordIndexBuilder<'a> {
  options: &'a BuildOptions,
  dictionary: JMDict,
  report: BuildReport,
}

impl<'a> WordIndexBuilder<'a> {
  /// 空の辞書から構築を始める
  pub fn new(options: &'a BuildOptions) -> Self {
    Self {
      options,
      dictionary: JMDict::new(),
      report: BuildReport::default(),
    }
  }

  /// 1レコード分のエントリーを追加する
  ///
  /// タグの出現数は、読みが1つでも採用されたレコードについて1回だけ数える
  /// （同じレコードの読みは sense を共有しているため）。
  pub fn add_record(&mut self, record: &Record) {
    self.report.record_record(record.entries.len());

    let mut counted = false;
    for entry in &record.entries {
      if !self.accepts(&entry.reading) {
        continue;
      }

      if !counted {
        self.dictionary.record_sense_tags(entry.senses.iter());
        counted = true;
      }

      let key = canonicalize(&entry.reading);
      self.dictionary.insert(key, to_dict_word(entry).with_record(record.index));
      self.report.record_added();
    }
  }

  /// 構築を終了し、辞書とレポートを返す
  pub fn finish(self) -> (JMDict, BuildReport) {
    (self.dictionary, self.report)
  }

  fn accepts(&mut self, reading: &str) -> bool {
    let length = reading.chars().count();
    if length < self.options.min_word_length {
      self.report.record_short();
      debug!(reading, length, min = self.options.min_word_length, "Reading too short, skipped");
      return false;
    }
    if let Some(banned) = self.options.banned.find(reading) {
      self.report.record_banned();
      warn!(reading, %banned, "Reading contains a banned character, skipped");
      return false;
    }
    true
  }
}

/// 外来語の特例: 唯一の表記が読みのカタカナ表記そのものなら、それを読みとして保存する
fn to_dict_word(entry: &Entry) -> DictWord {
  let senses = entry.senses.to_vec();
  match entry.kanji.as_slice() {
    [only] if *only == to_katakana(&entry.reading) => DictWord::new(only.clone(), Vec::new(), senses),
    _ => DictWord::new(entry.reading.clone(), entry.kanji.clone(), senses),
  }
}

/// 行の列から辞書を構築する
///
/// # エラー
/// - [`ParseError::UnclosedEntry`]: `<entry>` の入れ子、または途中で終わった入力
/// - [`ParseError::Record`]: レコード内のマークアップ不正
/// - [`ParseError::Io`]: 行の読み込み失敗
///
/// いずれの場合も部分的な辞書は返さない。
pub fn build<I>(lines: I, options: &BuildOptions) -> Result<(JMDict, BuildReport), ParseError>
where
  I: IntoIterator<Item = io::Result<String>>,
{
  info!(min_word_length = options.min_word_length, "Building dictionary");

  let mut reader = RecordReader::new(lines.into_iter());
  let mut builder = WordIndexBuilder::new(options);

  for record in reader.by_ref() {
    builder.add_record(&record?);
  }

  let (dictionary, mut report) = builder.finish();
  report.diagnostics = reader.into_diagnostics();

  info!(
    records = report.records,
    words = dictionary.word_count(),
    keys = dictionary.key_count(),
    skipped = report.skipped(),
    missing_tags = report.diagnostics.missing_tag_count(),
    "Dictionary built"
  );
  Ok((dictionary, report))
}

/// ファイルから辞書を構築する
///
/// ファイルハンドルはこの関数内でのみ保持され、戻る前に必ず解放される。
///
/// # エラー
/// - [`JmdictError::FileUnavailable`]: ファイルを開けない
/// - [`JmdictError::Parse`]: [`build`] のエラー
pub fn build_from_path(
  path: impl AsRef<Path>,
  options: &BuildOptions,
) -> JmdictResult<(JMDict, BuildReport)> {
  let path = path.as_ref();
  let file = File::open(path).map_err(|source| JmdictError::FileUnavailable {
    path: path.to_path_buf(),
    source: Arc::new(source),
  })?;

  debug!(path = %path.display(), "Opened dictionary source");
  Ok(build(BufReader::new(file).lines(), options)?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{Dialect, MiscTag};
  use crate::reader::text_lines;

  fn record(body: &str) -> String {
    format!("<entry>\n<ent_seq>1</ent_seq>\n{body}\n</entry>\n")
  }

  fn document(records: &[String]) -> String {
    format!("<JMdict>\n{}</JMdict>\n", records.concat())
  }

  fn build_text(text: &str) -> (JMDict, BuildReport) {
    build(text_lines(text), &BuildOptions::default()).unwrap()
  }

  #[test]
  fn short_reading_yields_empty_dictionary() {
    let text = document(&[record(
      "<k_ele>\n<keb>木</keb>\n</k_ele>\n<r_ele>\n<reb>き</reb>\n</r_ele>\n<sense>\n<gloss>tree</gloss>\n</sense>",
    )]);
    let (dict, report) = build_text(&text);

    assert!(dict.words().is_empty());
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.skipped_short, 1);
    assert_eq!(report.records, 1);
  }

  #[test]
  fn banned_reading_is_skipped() {
    let text = document(&[record(
      "<r_ele>\n<reb>ゑひ</reb>\n</r_ele>\n<sense>\n<gloss>drunk</gloss>\n</sense>",
    )]);
    let (dict, report) = build_text(&text);

    assert!(dict.is_empty());
    assert_eq!(report.skipped_banned, 1);
  }

  #[test]
  fn homonyms_share_canonical_key() {
    let text = document(&[
      record(
        "<k_ele>\n<keb>客</keb>\n</k_ele>\n<r_ele>\n<reb>きゃく</reb>\n</r_ele>\n<sense>\n<gloss>guest</gloss>\n</sense>",
      ),
      record(
        "<k_ele>\n<keb>規約</keb>\n</k_ele>\n<r_ele>\n<reb>きやく</reb>\n</r_ele>\n<sense>\n<gloss>agreement</gloss>\n</sense>",
      ),
    ]);
    let (dict, report) = build_text(&text);

    let homonyms = dict.get("きやく").unwrap();
    assert_eq!(homonyms.len(), 2);
    assert_eq!(homonyms[0].reading, "きゃく");
    assert_eq!(homonyms[1].reading, "きやく");
    assert_eq!(report.added, 2);
    assert_eq!(dict.key_count(), 1);
  }

  #[test]
  fn katakana_only_entry_is_stored_in_katakana() {
    let text = document(&[record(
      "<r_ele>\n<reb>パン</reb>\n</r_ele>\n<sense>\n<gloss>bread</gloss>\n</sense>",
    )]);
    let (dict, _) = build_text(&text);

    let words = dict.get("ぱん").unwrap();
    assert_eq!(words[0].reading, "パン");
    assert!(words[0].kanji.is_empty());
    assert_eq!(words[0].writing(), "パン");
  }

  #[test]
  fn stored_readings_canonicalize_to_their_key() {
    let text = document(&[
      record(
        "<k_ele>\n<keb>客</keb>\n</k_ele>\n<r_ele>\n<reb>きゃく</reb>\n</r_ele>\n<sense>\n<gloss>guest</gloss>\n</sense>",
      ),
      record("<r_ele>\n<reb>パン</reb>\n</r_ele>\n<sense>\n<gloss>bread</gloss>\n</sense>"),
    ]);
    let (dict, _) = build_text(&text);

    for (key, words) in dict.words() {
      for word in words {
        assert_eq!(&canonicalize(&word.reading), key);
      }
    }
  }

  #[test]
  fn tags_are_counted_once_per_record() {
    let text = document(&[record(
      "<r_ele>\n<reb>おおきに</reb>\n</r_ele>\n<r_ele>\n<reb>オオキニ</reb>\n<re_nokanji/>\n</r_ele>\n\
       <r_ele>\n<reb>おおけに</reb>\n</r_ele>\n\
       <sense>\n<dial>&ksb;</dial>\n<gloss>thanks</gloss>\n</sense>\n\
       <sense>\n<dial>&ksb;</dial>\n<misc>&uk;</misc>\n<gloss>thank you</gloss>\n</sense>\n\
       <sense>\n<dial>&ksb;</dial>\n<gloss>much obliged</gloss>\n</sense>",
    )]);
    let (dict, report) = build_text(&text);

    assert_eq!(report.added, 2);
    assert_eq!(dict.dialectal_count()[&Dialect::Kansai], 3);
    assert_eq!(dict.misc_count()[&MiscTag::UsuallyKana], 1);
  }

  #[test]
  fn accept_all_filter_reproduces_build_counts() {
    let text = document(&[
      record(
        "<r_ele>\n<reb>おおきに</reb>\n</r_ele>\n<r_ele>\n<reb>おおけに</reb>\n</r_ele>\n\
         <sense>\n<dial>&ksb;</dial>\n<gloss>thank you</gloss>\n</sense>",
      ),
      record("<r_ele>\n<reb>ほんま</reb>\n</r_ele>\n<sense>\n<dial>&ksb;</dial>\n<gloss>really</gloss>\n</sense>"),
    ]);
    let (dict, _) = build_text(&text);
    assert_eq!(dict.dialectal_count()[&Dialect::Kansai], 2);

    let filtered = dict.filter_useless_words(|_| true);
    assert_eq!(filtered.word_count(), 3);
    assert_eq!(filtered.dialectal_count(), dict.dialectal_count());
    assert_eq!(filtered.get("おおけに").unwrap()[0].record, Some(1));
  }

  #[test]
  fn skipped_record_does_not_count_tags() {
    let text = document(&[record(
      "<r_ele>\n<reb>な</reb>\n</r_ele>\n<sense>\n<dial>&ksb;</dial>\n<gloss>name</gloss>\n</sense>",
    )]);
    let (dict, _) = build_text(&text);

    assert!(dict.dialectal_count().is_empty());
  }

  #[test]
  fn unknown_tags_are_reported_not_fatal() {
    let text = document(&[record(
      "<r_ele>\n<reb>いぬ</reb>\n</r_ele>\n<sense>\n<dial>&zzz;</dial>\n<gloss>dog</gloss>\n</sense>",
    )]);
    let (dict, report) = build_text(&text);

    assert_eq!(dict.word_count(), 1);
    assert_eq!(report.diagnostics.missing_tag_count(), 1);
    assert!(dict.get("いぬ").unwrap()[0].senses[0].dialects.is_empty());
  }

  #[test]
  fn record_count_matches_close_markers() {
    let records: Vec<String> = ["いぬ", "ねこ", "とり"]
      .iter()
      .map(|reb| record(&format!("<r_ele>\n<reb>{reb}</reb>\n</r_ele>\n<sense>\n<gloss>x</gloss>\n</sense>")))
      .collect();
    let (_, report) = build_text(&document(&records));

    assert_eq!(report.records, 3);
    assert_eq!(report.entries, 3);
  }

  #[test]
  fn nested_entry_aborts_the_build() {
    let text = "<entry>\n<r_ele>\n<reb>いぬ</reb>\n</r_ele>\n<entry>\n</entry>\n";
    let err = build(text_lines(text), &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::UnclosedEntry { index: 1 }));
  }

  #[test]
  fn min_word_length_is_configurable() {
    let text = document(&[record(
      "<r_ele>\n<reb>き</reb>\n</r_ele>\n<sense>\n<gloss>tree</gloss>\n</sense>",
    )]);
    let options = BuildOptions {
      min_word_length: 1,
      ..BuildOptions::default()
    };
    let (dict, report) = build(text_lines(&text), &options).unwrap();

    assert_eq!(dict.word_count(), 1);
    assert_eq!(report.skipped(), 0);
  }

  #[test]
  fn missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = build_from_path(dir.path().join("absent.xml"), &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, JmdictError::FileUnavailable { .. }));
  }

  #[test]
  fn builds_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("JMdict_e");
    let text = document(&[record(
      "<r_ele>\n<reb>いぬ</reb>\n</r_ele>\n<sense>\n<gloss>dog</gloss>\n</sense>",
    )]);
    std::fs::write(&path, text).unwrap();

    let (dict, _) = build_from_path(&path, &BuildOptions::default()).unwrap();
    assert_eq!(dict.lookup("イヌ")[0].definition(), "いぬ: dog");
  }
}
