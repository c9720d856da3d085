//! Skips header/metadata lines at the top of a document.
//!
//! Documents often open with `Date:` / `Author:` style labels, a table of
//! contents marker or a handful of very short lines. Those lines make poor
//! prompt material and poor passages, so a short leading run of them is
//! dropped before the text is used.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::instrument;

/// Lines whose trimmed length is below this count as preamble.
pub const SHORT_LINE_CHARS: usize = 10;

static SEED_LABELS: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i)^(date|version|author|license|table of contents)\s*:").expect("valid regex")
});

static PASSAGE_LABELS: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?i)^(date|version|authors?|license|table of contents|title|subject|keywords|created|modified|last updated|copyright|document id|relevance|source)\s*:",
  )
  .expect("valid regex")
});

static CONTEXT_MARKER: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?i)^context\s+\d+\b").expect("valid regex"));

static PAGE_MARKER: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?i)^page\s+\d+(\s+of\s+\d+)?$").expect("valid regex"));

/// Which labels count as metadata and how far down to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreambleRules {
  /// First 10 lines; `Date:`, `Version:`, `Author:`, `License:`, `Table of Contents:`.
  Seed,
  /// First 20 lines; a broader label set plus `Context N`, `Relevance:`, `Source:` and page markers.
  Passage,
}

impl PreambleRules {
  pub fn window(self) -> usize {
    match self {
      PreambleRules::Seed => 10,
      PreambleRules::Passage => 20,
    }
  }

  /// Returns true if `line` looks like header/metadata under these rules.
  pub fn is_preamble_line(self, line: &str) -> bool {
    let line = line.trim();
    if line.chars().count() < SHORT_LINE_CHARS {
      return true;
    }
    match self {
      PreambleRules::Seed => SEED_LABELS.is_match(line),
      PreambleRules::Passage => {
        PASSAGE_LABELS.is_match(line) || CONTEXT_MARKER.is_match(line) || PAGE_MARKER.is_match(line)
      }
    }
  }
}

/// Drops the leading run of preamble lines within the rules' window.
///
/// Returns the remainder of `text` starting at the first line that is not
/// preamble (or at the first line past the window).
#[instrument(level = "trace", skip(text))]
pub fn strip_preamble(text: &str, rules: PreambleRules) -> &str {
  let mut offset = 0;
  for (i, line) in text.split_inclusive('\n').enumerate() {
    if i >= rules.window() || !rules.is_preamble_line(line) {
      break;
    }
    offset += line.len();
  }
  &text[offset..]
}
