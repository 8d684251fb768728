//! エラー定義

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::models::TagCategory;

/// 設定（JmdictConfig）関連のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
  /// parse.min_word_length < 1
  #[error("parse.min_word_length は 1 以上である必要があります: actual={actual}")]
  InvalidMinWordLength {
    /// 実際に指定された値
    actual: usize,
  },

  /// parse.banned_characters の要素が1文字ではない
  #[error("parse.banned_characters の要素は1文字である必要があります: value={value:?}")]
  InvalidBannedCharacter {
    /// 不正な要素
    value: String,
  },

  /// parse.banned_characters に重複がある
  #[error("parse.banned_characters に重複があります: value={value:?}")]
  DuplicateBannedCharacter {
    /// 重複した文字
    value: char,
  },

  /// filter.blocked_misc に未知のコードがある
  #[error("filter.blocked_misc に未知の misc コードがあります: code={code:?}")]
  UnknownBlockedMisc {
    /// 未知のコード
    code: String,
  },

  /// 設定ファイルの読み込みに失敗
  #[error("設定ファイルを読み込めません: path={path:?}, error={reason}")]
  Unreadable {
    /// 設定ファイルのパス
    path: PathBuf,
    /// 失敗の理由
    reason: String,
  },

  /// TOML の解析に失敗
  #[error("設定ファイルの TOML が不正です: {reason}")]
  InvalidToml {
    /// 解析エラーの内容
    reason: String,
  },
}

/// レコード内のマークアップに関するエラー
///
/// いずれもそのレコードにとって致命的で、辞書構築全体を中断させる。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MarkupError {
  /// 開きタグと閉じタグの数が一致しない
  #[error("タグ <{tag}> の開きタグと閉じタグの数が一致しません: open={open}, close={close}")]
  MalformedMarkup {
    /// 対象のタグ名
    tag: String,
    /// 開きタグの数
    open: usize,
    /// 閉じタグの数
    close: usize,
  },

  /// 1回だけ現れるべきタグが複数回現れた
  #[error("タグ <{tag}> が複数回現れました: context={context}")]
  MultipleSingleValueTag {
    /// 対象のタグ名
    tag: String,
    /// タグを含んでいたブロック
    context: String,
  },
}

/// 統制語彙（dialect / field / misc）に関するエラー
///
/// 致命的ではない。該当トークンは sense から除外され、ビルドレポートに記録される。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VocabularyError {
  /// 統制語彙に存在しないトークン
  #[error("未知の {category} タグです: {token}")]
  MissingControlledVocabulary {
    /// タグの分類
    category: TagCategory,
    /// エンティティ記号を取り除いたトークン
    token: String,
  },
}

/// 入力ストリームの解析エラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ParseError {
  /// 前のエントリーが閉じる前に次の `<entry>` が現れた（または入力が途中で終わった）
  #[error("エントリー #{index} が閉じられていません")]
  UnclosedEntry {
    /// 閉じられていないエントリーの番号（1始まり）
    index: usize,
  },

  /// エントリー内部のマークアップが不正
  #[error("エントリー #{index} の解析に失敗しました: {source}")]
  Record {
    /// エントリーの番号（1始まり）
    index: usize,
    /// 元となったマークアップエラー
    #[source]
    source: MarkupError,
  },

  /// 読み込み途中の I/O エラー
  #[error("入力の読み込みに失敗しました: {0}")]
  Io(Arc<io::Error>),
}

impl From<io::Error> for ParseError {
  fn from(error: io::Error) -> Self {
    Self::Io(Arc::new(error))
  }
}

/// スナップショット（JSON / バイナリ）のエンコード・デコードエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum SnapshotError {
  /// JSON の変換に失敗
  #[error("JSON スナップショットの変換に失敗しました: {0}")]
  Json(Arc<serde_json::Error>),

  /// バイナリの変換に失敗
  #[error("バイナリスナップショットの変換に失敗しました: {0}")]
  Binary(#[from] postcard::Error),

  /// 書き込みに失敗
  #[error("スナップショットの書き込みに失敗しました: {0}")]
  Io(Arc<io::Error>),

  /// スキーマのバージョンが一致しない
  #[error("未対応のスナップショット形式です: found={found}, expected={expected}")]
  UnsupportedVersion {
    /// スナップショットに記録されていたバージョン
    found: u32,
    /// このクレートが扱えるバージョン
    expected: u32,
  },
}

impl From<serde_json::Error> for SnapshotError {
  fn from(error: serde_json::Error) -> Self {
    Self::Json(Arc::new(error))
  }
}

impl From<io::Error> for SnapshotError {
  fn from(error: io::Error) -> Self {
    Self::Io(Arc::new(error))
  }
}

/// 統合エラー
/// 本クレートの外部に公開するエラー用 API はこのエラーを返すこと
/// `JmdictResult<T>` = `Result<T, JmdictError>` として使用する
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum JmdictError {
  /// 設定エラー
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// 入力解析エラー
  #[error(transparent)]
  Parse(#[from] ParseError),

  /// スナップショットエラー
  #[error(transparent)]
  Snapshot(#[from] SnapshotError),

  /// 入力ファイルを開けない
  #[error("入力ファイルを開けません: path={path:?}, error={source}")]
  FileUnavailable {
    /// 開こうとしたパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },
}

/// jmdict クレートの標準 Result 型エイリアス
pub type JmdictResult<T> = Result<T, JmdictError>;
