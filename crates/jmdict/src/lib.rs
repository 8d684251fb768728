//! jmdict 辞書構築ライブラリー
//!
//! JMdict 形式の XML 風テキストを1行ずつ読み込み、正規化した読みをキーとする辞書を構築する

/// 設定モジュール - JmdictConfig, LogLevel 等の設定構造体を定義
pub mod config;

/// デコーダーモジュール - 1レコードを読みごとの Entry に変換
pub mod decoder;

/// 辞書モジュール - 構築済み辞書 JMDict とビュー・スナップショット
pub mod dictionary;

/// エラーモジュール - JmdictError, JmdictResult 等のエラー型を定義
pub mod errors;

/// インデックスモジュール - エントリーから辞書を構築
pub mod indexer;

/// かなモジュール - 文字種変換・正規化キー・照合順序
pub mod kana;

/// マークアップモジュール - タグの中身の抽出
pub mod markup;

/// データモデルモジュール - Sense, Entry, DictWord 等のデータ構造と統制語彙を定義
pub mod models;

/// リーダーモジュール - 行ストリームをレコードに分割
pub mod reader;

/// サービスモジュール - JmdictService 等の上位レベルAPIを提供
pub mod service;

/// 再エクスポート
pub use config::{JmdictConfig, LogLevel};
pub use dictionary::{JMDict, SenseFilter};
pub use errors::{JmdictError, JmdictResult};
pub use indexer::{BuildOptions, BuildReport, build, build_from_path};
pub use models::{DictWord, Entry, Sense};
pub use service::JmdictService;
