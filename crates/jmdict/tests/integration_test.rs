//! crates/jmdict/tests/integration_test.rs
//!
//! End-to-end integration test.
//! Verifies the entire flow: Write source file -> Build dictionary ->
//! Look up words -> Render views -> Write and read snapshots.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use tempfile::TempDir;

use jmdict::dictionary::{read_binary, read_json, write_binary, write_json};
use jmdict::errors::{MarkupError, ParseError};
use jmdict::models::{Dialect, Field, MiscTag};
use jmdict::{BuildOptions, JmdictConfig, JmdictError, JmdictService, build_from_path};

/// Small JMdict-shaped source covering the record shapes the builder handles.
const SOURCE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JMdict [
<!ENTITY ksb "Kansai-ben">
]>
<JMdict>
<entry>
<ent_seq>1000010</ent_seq>
<k_ele>
<keb>明日</keb>
</k_ele>
<k_ele>
<keb>翌日</keb>
</k_ele>
<r_ele>
<reb>あした</reb>
</r_ele>
<r_ele>
<reb>よくじつ</reb>
<re_restr>翌日</re_restr>
</r_ele>
<sense>
<gloss>tomorrow</gloss>
</sense>
</entry>
<entry>
<ent_seq>1000020</ent_seq>
<r_ele>
<reb>パン</reb>
</r_ele>
<sense>
<misc>&uk;</misc>
<gloss>bread</gloss>
</sense>
</entry>
<entry>
<ent_seq>1000030</ent_seq>
<r_ele>
<reb>おおきに</reb>
</r_ele>
<sense>
<dial>&ksb;</dial>
<gloss>thank you</gloss>
</sense>
</entry>
<entry>
<ent_seq>1000040</ent_seq>
<k_ele>
<keb>々</keb>
</k_ele>
<r_ele>
<reb>のま</reb>
</r_ele>
<sense>
<gloss g_type="expl">repetition mark</gloss>
<s_inf>also written 仝</s_inf>
<s_inf>second note</s_inf>
</sense>
</entry>
<entry>
<ent_seq>1000050</ent_seq>
<k_ele>
<keb>木</keb>
</k_ele>
<r_ele>
<reb>き</reb>
</r_ele>
<sense>
<gloss>tree</gloss>
</sense>
</entry>
<entry>
<ent_seq>1000060</ent_seq>
<k_ele>
<keb>料理</keb>
</k_ele>
<r_ele>
<reb>りょうり</reb>
</r_ele>
<sense>
<field>&food;</field>
<gloss>cooking &amp; cuisine</gloss>
</sense>
<sense>
<field>&zzz;</field>
<misc>&arch;</misc>
<gloss>management</gloss>
</sense>
</entry>
<entry>
<ent_seq>1000070</ent_seq>
<r_ele>
<reb>ゐど</reb>
</r_ele>
<sense>
<gloss>well (old spelling)</gloss>
</sense>
</entry>
</JMdict>
"#;

/// Write the source into a temporary directory.
fn write_source(text: &str) -> (TempDir, PathBuf) {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");
  let path = temp_dir.path().join("JMdict_e");
  std::fs::write(&path, text).expect("Failed to write source");
  (temp_dir, path)
}

#[test]
fn end_to_end_build() {
  let (_temp_dir, path) = write_source(SOURCE);
  let (dict, report) = build_from_path(&path, &BuildOptions::default()).expect("build failed");

  // ─── Report ────────────────────────────────────────────────────────────────
  assert_eq!(report.records, 7);
  assert_eq!(report.skipped_short, 1);
  assert_eq!(report.skipped_banned, 1);
  assert_eq!(report.added, 6);
  assert_eq!(report.diagnostics.secondary_notes, 1);
  assert_eq!(report.diagnostics.missing_tag_count(), 1);

  // ─── Restriction resolution ────────────────────────────────────────────────
  assert_eq!(dict.lookup("あした")[0].kanji, vec!["明日", "翌日"]);
  assert_eq!(dict.lookup("よくじつ")[0].kanji, vec!["翌日"]);

  // ─── Loanword stored in katakana ──────────────────────────────────────────
  let pan = &dict.lookup("ぱん")[0];
  assert_eq!(pan.reading, "パン");
  assert!(pan.kanji.is_empty());

  // ─── Sense content ─────────────────────────────────────────────────────────
  let noma = &dict.lookup("のま")[0];
  assert_eq!(noma.senses[0].meanings, vec!["repetition mark"]);
  assert_eq!(noma.senses[0].info.as_deref(), Some("also written 仝"));

  let ryouri = &dict.lookup("りょうり")[0];
  assert_eq!(ryouri.definition(), "料理: cooking & cuisine; management");
  assert!(ryouri.senses[1].fields.is_empty());

  // ─── Skipped readings never appear ────────────────────────────────────────
  assert!(dict.get("き").is_none());
  assert!(dict.get("ゐど").is_none());

  // ─── Tag counts ────────────────────────────────────────────────────────────
  assert_eq!(dict.dialectal_count()[&Dialect::Kansai], 1);
  assert_eq!(dict.field_count()[&Field::Food], 1);
  assert_eq!(dict.misc_count()[&MiscTag::UsuallyKana], 1);
  assert_eq!(dict.misc_count()[&MiscTag::Archaic], 1);
}

#[test]
fn views_follow_dictionary_order() {
  let (_temp_dir, path) = write_source(SOURCE);
  let service = JmdictService::load(&JmdictConfig::default(), &path).expect("load failed");

  assert_eq!(
    service.sorted_keys(),
    vec!["あした", "おおきに", "のま", "ぱん", "よくじつ", "りようり"]
  );

  let all = service.flatten_all();
  assert_eq!(all.len(), 6);
  assert_eq!(all[0], "あした\t明日、翌日: tomorrow");
  assert_eq!(all[3], "パン\tパン: bread");

  // Dialect words go; archaic-only senses do not remove a word with other senses.
  let common = service.flatten_common();
  assert_eq!(common.len(), 5);
  assert!(common.iter().all(|line| !line.starts_with("おおきに")));
  assert!(common.contains(&"りょうり\t料理: cooking & cuisine; management".to_string()));
}

#[test]
fn snapshots_restore_the_dictionary() {
  let (temp_dir, path) = write_source(SOURCE);
  let (dict, _) = build_from_path(&path, &BuildOptions::default()).expect("build failed");

  let json_path = temp_dir.path().join("jmdict.json");
  write_json(&dict, BufWriter::new(File::create(&json_path).unwrap())).unwrap();
  let from_json = read_json(File::open(&json_path).unwrap()).unwrap();
  assert_eq!(from_json, dict);

  let bin_path = temp_dir.path().join("jmdict.bin");
  write_binary(&dict, BufWriter::new(File::create(&bin_path).unwrap())).unwrap();
  let from_binary = read_binary(&std::fs::read(&bin_path).unwrap()).unwrap();
  assert_eq!(from_binary, dict);
}

#[test]
fn malformed_record_aborts_with_index() {
  let text = "<JMdict>\n<entry>\n<r_ele>\n<reb>いぬ</reb>\n</r_ele>\n</entry>\n\
              <entry>\n<r_ele>\n<reb>ねこ</reb>\n<reb>ねこ</reb>\n</r_ele>\n</entry>\n</JMdict>\n";
  let (_temp_dir, path) = write_source(text);

  let err = build_from_path(&path, &BuildOptions::default()).unwrap_err();
  match err {
    JmdictError::Parse(ParseError::Record { index, source }) => {
      assert_eq!(index, 2);
      assert!(matches!(source, MarkupError::MultipleSingleValueTag { .. }));
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

#[test]
fn unclosed_entry_aborts_the_build() {
  let text = "<JMdict>\n<entry>\n<r_ele>\n<reb>いぬ</reb>\n</r_ele>\n<entry>\n</entry>\n</JMdict>\n";
  let (_temp_dir, path) = write_source(text);

  let err = JmdictService::load(&JmdictConfig::default(), &path).unwrap_err();
  assert!(matches!(err, JmdictError::Parse(ParseError::UnclosedEntry { index: 1 })));
}
