//! kana モジュール
//!
//! 仮名の表記変換（カタカナ→ひらがな、小書き文字の正規化）と辞書順の比較を提供します。
pub mod collation;
pub mod normalizer;

/// 再エクスポート
pub use collation::{compare, sort_unique};
pub use normalizer::{
  BannedCharacters, INTERPUNCT, LONG_VOWEL_MARK, canonicalize, collapse_small_forms, is_katakana,
  strip_interpunct, to_hiragana, to_katakana,
};
