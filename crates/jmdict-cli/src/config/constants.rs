//! CLI 設定の定数定義

/// 最小の読みの長さを上書きする環境変数
pub const ENV_MIN_WORD_LENGTH: &str = "JMDICT_MIN_WORD_LENGTH";

/// ログレベルを上書きする環境変数
pub const ENV_LOG_LEVEL: &str = "JMDICT_LOG_LEVEL";

/// `--out-dir` 未指定時の出力先
pub const DEFAULT_OUT_DIR: &str = ".";

/// JSON スナップショットの拡張子
pub const JSON_EXTENSION: &str = "json";

/// バイナリスナップショットの拡張子
pub const BINARY_EXTENSION: &str = "bin";

/// キー一覧ファイルの接尾辞
pub const KEYS_SUFFIX: &str = "-keys.txt";

/// 平坦化（全単語）ファイルの接尾辞
pub const WORDS_SUFFIX: &str = "-words.txt";

/// 平坦化（常用語）ファイルの接尾辞
pub const COMMON_SUFFIX: &str = "-common.txt";

/// 書き込み中の出力を置く一時ディレクトリの接頭辞
pub const STAGING_PREFIX: &str = ".jmdict-export-";
