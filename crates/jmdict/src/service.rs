// crates/jmdict/src/service.rs

//! JmdictService: jmdict クレートの統合ファサード。
//!
//! - 設定の検証
//! - 入力ファイルからの辞書構築 (build_from_path)
//! - ビュー（キー一覧・平坦化・常用語フィルタ）
//!
//! CLI などの外部からは、この構造体だけを意識すればよい。

use std::path::Path;

use tracing::info;

use crate::config::JmdictConfig;
use crate::dictionary::{JMDict, SenseFilter};
use crate::errors::JmdictResult;
use crate::indexer::{BuildOptions, BuildReport, build_from_path};

/// jmdict クレートの統合ファサード。
///
/// 構築済みの辞書と構築レポート、常用語フィルタを保持する。
#[derive(Debug, Clone)]
pub struct JmdictService {
  /// 構築済み辞書
  dictionary: JMDict,

  /// 構築レポート
  report: BuildReport,

  /// 常用語ビュー用の sense フィルタ
  filter: SenseFilter,
}

impl JmdictService {
  /// 初期化（設定検証 + 辞書構築）
  ///
  /// # 処理フロー
  /// 1. 設定の妥当性を検証
  /// 2. 設定から構築オプションと sense フィルタを作成
  /// 3. ファイルから辞書を構築
  ///
  /// # エラー
  /// - 設定が不正
  /// - 入力ファイルを開けない
  /// - 入力の解析に失敗（未閉鎖エントリー、マークアップ不正、I/O エラー）
  pub fn load(config: &JmdictConfig, path: impl AsRef<Path>) -> JmdictResult<Self> {
    // ConfigError は #[from] で JmdictError に自動変換
    config.validate()?;

    let options = BuildOptions::from_config(config);
    let (dictionary, report) = build_from_path(path, &options)?;

    Ok(Self::from_parts(dictionary, report, config.sense_filter()))
  }

  /// 構築済みの辞書からサービスを組み立てる。
  pub fn from_parts(dictionary: JMDict, report: BuildReport, filter: SenseFilter) -> Self {
    Self {
      dictionary,
      report,
      filter,
    }
  }

  // ===== ビュー =====

  /// 全キーを辞書順で返す。
  pub fn sorted_keys(&self) -> Vec<&str> {
    self.dictionary.sorted_keys()
  }

  /// フィルタなしの平坦化。
  pub fn flatten_all(&self) -> Vec<String> {
    self.dictionary.flatten(None)
  }

  /// 設定済みフィルタを通した常用語の平坦化。
  pub fn flatten_common(&self) -> Vec<String> {
    self.common_words().flatten(None)
  }

  /// 設定済みフィルタで有用な sense を持つ単語だけを残した辞書。
  pub fn common_words(&self) -> JMDict {
    let common = self.dictionary.filter_useless_words(|sense| self.filter.accepts(sense));
    info!(
      words = common.word_count(),
      dropped = self.dictionary.word_count() - common.word_count(),
      reject_dialects = self.filter.rejects_dialects(),
      blocked = self.filter.blocked().len(),
      "Filtered common words"
    );
    common
  }

  // ===== アクセサ =====

  /// 構築済み辞書への参照を返す。
  pub fn dictionary(&self) -> &JMDict {
    &self.dictionary
  }

  /// 構築レポートへの参照を返す。
  pub fn report(&self) -> &BuildReport {
    &self.report
  }

  /// sense フィルタへの参照を返す。
  pub fn filter(&self) -> &SenseFilter {
    &self.filter
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// テストモジュール
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::errors::{ConfigError, JmdictError};

  const SOURCE: &str = "\
<JMdict>
<entry>
<ent_seq>1</ent_seq>
<r_ele>
<reb>おおきに</reb>
</r_ele>
<sense>
<dial>&ksb;</dial>
<gloss>thank you</gloss>
</sense>
</entry>
<entry>
<ent_seq>2</ent_seq>
<k_ele>
<keb>犬</keb>
</k_ele>
<r_ele>
<reb>いぬ</reb>
</r_ele>
<sense>
<gloss>dog</gloss>
</sense>
</entry>
</JMdict>
";

  // ─── テスト用ヘルパー関数 ───────────────────────────────────────────────────

  fn load_service(config: &JmdictConfig) -> (tempfile::TempDir, JmdictResult<JmdictService>) {
    let temp_dir = tempfile::TempDir::new().expect("一時ディレクトリ作成失敗");
    let path = temp_dir.path().join("JMdict_e");
    std::fs::write(&path, SOURCE).expect("入力ファイル作成失敗");
    let service = JmdictService::load(config, &path);
    (temp_dir, service)
  }

  // ─── 初期化テスト ──────────────────────────────────────────────────────────

  #[test]
  fn service_loads_with_default_config() {
    let (_temp_dir, service) = load_service(&JmdictConfig::default());
    let service = service.expect("JmdictService 初期化失敗");

    assert_eq!(service.dictionary().word_count(), 2);
    assert_eq!(service.report().records, 2);
    assert_eq!(service.sorted_keys(), vec!["いぬ", "おおきに"]);
  }

  #[test]
  fn service_rejects_invalid_config() {
    let mut config = JmdictConfig::default();
    config.parse.min_word_length = 0;

    let (_temp_dir, service) = load_service(&config);
    assert!(matches!(
      service,
      Err(JmdictError::Config(ConfigError::InvalidMinWordLength { actual: 0 }))
    ));
  }

  // ─── ビューテスト ──────────────────────────────────────────────────────────

  #[test]
  fn flatten_common_drops_dialect_words() {
    let (_temp_dir, service) = load_service(&JmdictConfig::default());
    let service = service.expect("JmdictService 初期化失敗");

    assert_eq!(service.flatten_all().len(), 2);
    assert_eq!(service.flatten_common(), vec!["いぬ\t犬: dog"]);
    assert!(service.common_words().lookup("おおきに").is_empty());
  }
}
