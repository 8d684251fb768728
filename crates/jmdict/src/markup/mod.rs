//! markup モジュール
//!
//! レコード内のタグ抽出を担当します。
pub mod tag_extractor;

/// 再エクスポート
pub use tag_extractor::{extract, extract_single, has_element, unescape_entities};
