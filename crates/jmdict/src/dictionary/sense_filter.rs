//! Sense predicate for the "common words" view.

use std::collections::BTreeSet;

use crate::models::{MiscTag, Sense};

/// Accepts senses that are neither dialectal (optionally) nor carry a blocked misc tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenseFilter {
  reject_dialects: bool,
  blocked: BTreeSet<MiscTag>,
}

impl SenseFilter {
  /// Filter rejecting dialect senses when `reject_dialects` is set, and senses tagged with any `blocked` tag.
  pub fn new(reject_dialects: bool, blocked: BTreeSet<MiscTag>) -> Self {
    Self {
      reject_dialects,
      blocked,
    }
  }

  /// Whether dialect-tagged senses are rejected.
  pub fn rejects_dialects(&self) -> bool {
    self.reject_dialects
  }

  /// Misc tags that reject a sense.
  pub fn blocked(&self) -> &BTreeSet<MiscTag> {
    &self.blocked
  }

  /// Whether the sense passes the filter.
  pub fn accepts(&self, sense: &Sense) -> bool {
    if self.reject_dialects && !sense.dialects.is_empty() {
      return false;
    }
    sense.misc.is_disjoint(&self.blocked)
  }
}
