//! indexer モジュール
//!
//! デコード済みエントリーから辞書（JMDict）を構築します。

pub mod index_builder;
pub mod report;

/// 主要な型を再エクスポート
pub use index_builder::{BuildOptions, WordIndexBuilder, build, build_from_path};
pub use report::BuildReport;
