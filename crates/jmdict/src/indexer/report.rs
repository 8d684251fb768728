//! 辞書構築結果のレポート型定義
//!
//! レコード数・追加件数・スキップ件数と、デコード時の非致命的な診断を集計します。

use serde::{Deserialize, Serialize};

use crate::decoder::DecodeDiagnostics;

/// `build` の集計結果
///
/// 致命的エラーなく最後まで構築できた場合にのみ返される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
  /// デコードしたレコード（`</entry>`）の数
  pub records: usize,
  /// レコードから得られたエントリー（読み）の総数
  pub entries: usize,
  /// 辞書に追加された単語数
  pub added: usize,
  /// 最小長未満のためスキップされた読みの数
  pub skipped_short: usize,
  /// 禁止文字を含むためスキップされた読みの数
  pub skipped_banned: usize,
  /// デコード時の診断（未知タグ・複数の注記など）
  pub diagnostics: DecodeDiagnostics,
}

impl BuildReport {
  /// スキップされた読みの合計
  pub fn skipped(&self) -> usize {
    self.skipped_short + self.skipped_banned
  }

  /// 全ての読みが追加されたか（skipped == 0）
  pub fn is_all_added(&self) -> bool {
    self.skipped() == 0
  }

  /// レコードを記録
  pub fn record_record(&mut self, entries: usize) {
    self.records += 1;
    self.entries += entries;
  }

  /// 追加成功を記録
  pub fn record_added(&mut self) {
    self.added += 1;
  }

  /// 短すぎる読みのスキップを記録
  pub fn record_short(&mut self) {
    self.skipped_short += 1;
  }

  /// 禁止文字を含む読みのスキップを記録
  pub fn record_banned(&mut self) {
    self.skipped_banned += 1;
  }
}
