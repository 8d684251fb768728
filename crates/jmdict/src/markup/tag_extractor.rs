//! Tag extraction for the JMdict element vocabulary.
//!
//! This is not an XML parser. It only finds `<tag ...>inner</tag>` pairs of
//! one exact element name inside a record, which is all the file family needs.

use std::borrow::Cow;

use quick_xml::escape::unescape;
use tracing::debug;

use crate::errors::MarkupError;

/// Returns the inner text of every `<tag ...>` … `</tag>` occurrence in `blob`.
///
/// Scanning walks the close markers in order; each one is paired with the
/// first open marker after the previous close. Opening tags may carry
/// attributes (`<gloss g_type="expl">`). Tag names match exactly and
/// case-sensitively, so `k` never matches `<k_ele>`.
///
/// # Errors
/// [`MarkupError::MalformedMarkup`] when the number of open and close markers differ,
/// or when a close marker has no open marker before it.
pub fn extract(tag: &str, blob: &str) -> Result<Vec<String>, MarkupError> {
  let close = format!("</{tag}>");
  let open_count = open_markers(tag, blob).len();
  let close_count = blob.matches(close.as_str()).count();

  if open_count != close_count {
    return Err(malformed(tag, open_count, close_count));
  }

  let mut values = Vec::with_capacity(close_count);
  let mut start = 0;
  for (close_pos, _) in blob.match_indices(close.as_str()) {
    let segment = &blob[start..close_pos];
    let open_pos = open_markers(tag, segment)
      .first()
      .copied()
      .ok_or_else(|| malformed(tag, open_count, close_count))?;

    // `<tag` is followed by either `>` or attributes ending at the first `>`
    let after_name = open_pos + tag.len() + 1;
    let content_start = segment[after_name..]
      .find('>')
      .map(|offset| after_name + offset + 1)
      .ok_or_else(|| malformed(tag, open_count, close_count))?;

    values.push(segment[content_start..].to_string());
    start = close_pos + close.len();
  }

  Ok(values)
}

/// Returns the inner text of a tag that may occur at most once in `blob`.
///
/// # Errors
/// - [`MarkupError::MultipleSingleValueTag`] when the tag occurs more than once
/// - [`MarkupError::MalformedMarkup`] as in [`extract`]
pub fn extract_single(tag: &str, blob: &str) -> Result<Option<String>, MarkupError> {
  let mut values = extract(tag, blob)?;
  if values.len() > 1 {
    return Err(MarkupError::MultipleSingleValueTag {
      tag: tag.to_string(),
      context: blob.trim().to_string(),
    });
  }
  Ok(values.pop())
}

/// Whether `blob` contains the element `tag` in any form, including the
/// empty-element form `<tag/>` used for flags such as `<re_nokanji/>`.
pub fn has_element(tag: &str, blob: &str) -> bool {
  blob.contains(&format!("<{tag}/>")) || !open_markers(tag, blob).is_empty()
}

/// Decodes XML entity and character references in free text.
///
/// Text holding a reference XML does not define (`&ksb;`, a bare `&`) is
/// returned unchanged.
pub fn unescape_entities(text: &str) -> Cow<'_, str> {
  match unescape(text) {
    Ok(decoded) => decoded,
    Err(error) => {
      debug!(%error, text, "Text kept as written");
      Cow::Borrowed(text)
    }
  }
}

/// Byte offsets of every `<tag>` / `<tag attr...>` open marker in `text`.
fn open_markers(tag: &str, text: &str) -> Vec<usize> {
  let marker = format!("<{tag}");
  text
    .match_indices(marker.as_str())
    .filter(|(pos, _)| {
      match text[pos + marker.len()..].chars().next() {
        Some('>') => true,
        Some(c) => c.is_whitespace(),
        None => false,
      }
    })
    .map(|(pos, _)| pos)
    .collect()
}

fn malformed(tag: &str, open: usize, close: usize) -> MarkupError {
  MarkupError::MalformedMarkup {
    tag: tag.to_string(),
    open,
    close,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
