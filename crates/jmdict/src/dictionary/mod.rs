//! dictionary モジュール
//!
//! 構築済み辞書（JMDict）と、その読み取り専用ビュー・スナップショットを提供します。

pub mod jmdict;
pub mod sense_filter;
pub mod snapshot;
pub mod view;

/// 主要な型を再エクスポート
pub use jmdict::{DictionaryStats, JMDict, TagCount};
pub use sense_filter::SenseFilter;
pub use snapshot::{SNAPSHOT_FORMAT_VERSION, Snapshot, read_binary, read_json, write_binary, write_json};
pub use view::{DEFINITION_SEPARATOR, READING_SEPARATOR};
