//! Streaming record reader.
//!
//! Consumes the input one line at a time, rebuilds `<entry>` … `</entry>`
//! boundaries and hands each record to the [`EntryDecoder`]. Only the current
//! record is buffered, so memory stays flat regardless of file size.

use std::io;

use tracing::{trace, warn};

use crate::decoder::{DecodeDiagnostics, EntryDecoder};
use crate::errors::ParseError;
use crate::models::Entry;

/// Line prefix opening a record.
pub const ENTRY_OPEN: &str = "<entry>";

/// Line prefix closing a record.
pub const ENTRY_CLOSE: &str = "</entry>";

/// A decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  /// 1-based position of the record in the input
  pub index: usize,
  /// Entries decoded from the record
  pub entries: Vec<Entry>,
}

/// Reader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
  /// Between records
  Outside,
  /// Accumulating the lines of a record
  InEntry,
}

/// Iterator over the decoded records of a line stream.
///
/// Yields `Err` at most once; the iterator is exhausted afterwards.
#[derive(Debug)]
pub struct RecordReader<I> {
  lines: I,
  state: ReaderState,
  buffer: String,
  closed: usize,
  finished: bool,
  decoder: EntryDecoder,
}

impl<I> RecordReader<I>
where
  I: Iterator<Item = io::Result<String>>,
{
  /// Wraps a line iterator such as `BufRead::lines()`.
  pub fn new(lines: I) -> Self {
    Self {
      lines,
      state: ReaderState::Outside,
      buffer: String::new(),
      closed: 0,
      finished: false,
      decoder: EntryDecoder::new(),
    }
  }

  /// Diagnostics gathered by the decoder so far.
  pub fn diagnostics(&self) -> &DecodeDiagnostics {
    self.decoder.diagnostics()
  }

  /// Consumes the reader, returning the decoder's diagnostics.
  pub fn into_diagnostics(self) -> DecodeDiagnostics {
    self.decoder.into_diagnostics()
  }

  fn fail(&mut self, error: ParseError) -> Option<Result<Record, ParseError>> {
    self.finished = true;
    Some(Err(error))
  }

  fn unclosed(&mut self) -> Option<Result<Record, ParseError>> {
    let index = self.closed + 1;
    self.fail(ParseError::UnclosedEntry { index })
  }

  fn append(&mut self, line: &str) {
    self.buffer.push_str(line);
    self.buffer.push('\n');
  }
}

impl<I> Iterator for RecordReader<I>
where
  I: Iterator<Item = io::Result<String>>,
{
  type Item = Result<Record, ParseError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }

    loop {
      let line = match self.lines.next() {
        Some(Ok(line)) => line,
        Some(Err(error)) => return self.fail(error.into()),
        None => {
          self.finished = true;
          return match self.state {
            ReaderState::InEntry => self.unclosed(),
            ReaderState::Outside => None,
          };
        }
      };

      if line.starts_with(ENTRY_OPEN) {
        match self.state {
          ReaderState::InEntry => return self.unclosed(),
          ReaderState::Outside => {
            self.state = ReaderState::InEntry;
            self.buffer.clear();
            self.append(&line);
          }
        }
      } else if line.starts_with(ENTRY_CLOSE) {
        match self.state {
          ReaderState::Outside => {
            warn!(after_record = self.closed, "Stray </entry> outside a record, ignored");
          }
          ReaderState::InEntry => {
            self.append(&line);
            self.state = ReaderState::Outside;
            self.closed += 1;
            let index = self.closed;

            return match self.decoder.decode(&self.buffer) {
              Ok(entries) => {
                trace!(index, entries = entries.len(), "Record closed");
                Some(Ok(Record { index, entries }))
              }
              Err(source) => self.fail(ParseError::Record { index, source }),
            };
          }
        }
      } else if self.state == ReaderState::InEntry {
        self.append(&line);
      }
    }
  }
}

impl<I> std::iter::FusedIterator for RecordReader<I> where I: Iterator<Item = io::Result<String>> {}

/// Adapts in-memory text to the line iterator the reader expects.
pub fn text_lines(text: &str) -> impl Iterator<Item = io::Result<String>> + '_ {
  text.lines().map(|line| Ok(line.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
