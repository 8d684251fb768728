//! CLIエラー定義

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

// jmdict クレートのエラー型をインポート
use jmdict::errors::{JmdictError, SnapshotError};

/// エラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
  /// 入力ファイルが無効
  InvalidInput,
  /// 設定エラー
  Config,
  /// 入力の解析エラー
  Parse,
  /// 入出力エラー
  Io,
  /// 内部エラー
  Internal,
}

impl CliErrorKind {
  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidInput => "invalid_input",
      Self::Config => "config_error",
      Self::Parse => "parse_error",
      Self::Io => "io_error",
      Self::Internal => "internal_error",
    }
  }

  /// 終了ステータスを取得（sysexits.h の値）
  #[must_use]
  pub fn exit_status(&self) -> u8 {
    match self {
      Self::InvalidInput => 66,
      Self::Config => 78,
      Self::Parse => 65,
      Self::Io => 74,
      Self::Internal => 70,
    }
  }
}

/// CLIエラー
#[derive(Debug, Error)]
pub enum CliError {
  /// 入力ファイルが存在しない、またはファイルではない
  #[error("入力ファイルが見つかりません: {0:?}")]
  InputNotFound(PathBuf),

  /// 設定エラー
  #[error("設定エラー: {0}")]
  Config(String),

  /// 辞書構築エラー
  #[error(transparent)]
  Jmdict(#[from] JmdictError),

  /// テキスト出力の書き込み失敗
  #[error("出力ファイルを書き込めません: path={path:?}, error={source}")]
  Export {
    /// 出力先のパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: io::Error,
  },

  /// スナップショットの書き込み失敗
  #[error("スナップショットを書き込めません: path={path:?}, error={source}")]
  Snapshot {
    /// 出力先のパス
    path: PathBuf,
    /// 元となったスナップショットエラー
    #[source]
    source: SnapshotError,
  },
}

impl CliError {
  /// エラーの種類を取得
  #[must_use]
  pub fn kind(&self) -> CliErrorKind {
    match self {
      Self::InputNotFound(_) => CliErrorKind::InvalidInput,
      Self::Config(_) => CliErrorKind::Config,
      Self::Export { .. } | Self::Snapshot { .. } => CliErrorKind::Io,
      Self::Jmdict(err) => match err {
        JmdictError::Config(_) => CliErrorKind::Config,
        JmdictError::Parse(_) => CliErrorKind::Parse,
        JmdictError::FileUnavailable { .. } | JmdictError::Snapshot(_) => CliErrorKind::Io,
        // #[non_exhaustive] な enum のため、将来追加されるバリアントに対応
        _ => CliErrorKind::Internal,
      },
    }
  }

  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// プロセスの終了コードを取得
  #[must_use]
  pub fn exit_code(&self) -> ExitCode {
    ExitCode::from(self.kind().exit_status())
  }

  /// 入力ファイル不在エラーを作成
  #[must_use]
  pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
    Self::InputNotFound(path.into())
  }

  /// 設定エラーを作成
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }

  /// 書き込みエラーを作成
  #[must_use]
  pub fn export(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Export {
      path: path.into(),
      source,
    }
  }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, CliError>;
