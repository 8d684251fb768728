//! Config module

mod constants;
mod env;

pub use constants::{
  BINARY_EXTENSION, COMMON_SUFFIX, DEFAULT_OUT_DIR, ENV_LOG_LEVEL, ENV_MIN_WORD_LENGTH,
  JSON_EXTENSION, KEYS_SUFFIX, STAGING_PREFIX, WORDS_SUFFIX,
};
pub use env::{apply_overrides, load_config};
