//! Heuristic passage extraction used for seeding and context retrieval.
//!
//! No embeddings and no ranking: passages come out in document order, and the
//! first strategy that yields anything wins.
//!
//! 1. Paragraphs (blank-line separated) longer than [MIN_PARAGRAPH_CHARS].
//! 2. Non-blank lines regrouped into ~[LINE_CHUNK_CHARS] character chunks.
//! 3. Fixed [FIXED_SLICE_CHARS] character slices of the raw content.

use tracing::{instrument, trace};

use crate::preamble::{PreambleRules, strip_preamble};
use crate::text::{char_len, char_slices, truncate_chars};

/// At most this many passages are returned.
pub const MAX_PASSAGES: usize = 3;
/// Paragraphs must be strictly longer than this to count.
pub const MIN_PARAGRAPH_CHARS: usize = 50;
/// Paragraphs longer than this are cut and suffixed with [ELLIPSIS].
pub const MAX_PARAGRAPH_CHARS: usize = 1000;
pub const ELLIPSIS: &str = "...";
/// Target size of a line chunk.
pub const LINE_CHUNK_CHARS: usize = 500;
/// A line chunk is only closed once it is longer than this.
pub const MIN_LINE_CHUNK_CHARS: usize = 100;
pub const FIXED_SLICE_CHARS: usize = 500;
/// Raw content must be longer than this for fixed slicing to apply.
pub const MIN_SLICEABLE_CHARS: usize = 100;

/// Extracts up to [MAX_PASSAGES] passages from `content`.
///
/// `_question` is accepted so callers do not change once relevance scoring is
/// added; it does not influence the result today. Pure: the same content always
/// yields the same passages.
#[instrument(level = "trace", skip(_question, content))]
pub fn extract_passages(_question: &str, content: &str) -> Vec<String> {
  let body = strip_preamble(content, PreambleRules::Passage);

  let mut passages = paragraphs(body);
  if passages.is_empty() {
    trace!("no paragraphs, falling back to line chunks");
    passages = line_chunks(body);
  }
  if passages.is_empty() && char_len(content) > MIN_SLICEABLE_CHARS {
    trace!("no line chunks, falling back to fixed slices");
    passages = char_slices(content, FIXED_SLICE_CHARS)
      .into_iter()
      .map(String::from)
      .collect();
  }
  passages.truncate(MAX_PASSAGES);
  passages
}

/// Blank-line separated paragraphs longer than [MIN_PARAGRAPH_CHARS], capped at
/// [MAX_PARAGRAPH_CHARS].
pub(crate) fn paragraphs(body: &str) -> Vec<String> {
  let mut out = Vec::new();
  let mut current: Vec<&str> = Vec::new();
  for line in body.lines().chain(std::iter::once("")) {
    if !line.trim().is_empty() {
      current.push(line);
      continue;
    }
    if current.is_empty() {
      continue;
    }
    let paragraph = current.join("\n");
    current.clear();
    let paragraph = paragraph.trim();
    if char_len(paragraph) > MIN_PARAGRAPH_CHARS {
      out.push(cap_paragraph(paragraph));
    }
  }
  out
}

fn cap_paragraph(paragraph: &str) -> String {
  if char_len(paragraph) > MAX_PARAGRAPH_CHARS {
    format!("{}{}", truncate_chars(paragraph, MAX_PARAGRAPH_CHARS), ELLIPSIS)
  } else {
    paragraph.to_string()
  }
}

/// Non-blank lines grouped into chunks of roughly [LINE_CHUNK_CHARS]. Lines are never split.
pub(crate) fn line_chunks(body: &str) -> Vec<String> {
  let mut out = Vec::new();
  let mut current = String::new();
  let mut current_len = 0;
  for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
    let line_len = char_len(line);
    if current_len + line_len > LINE_CHUNK_CHARS && current_len > MIN_LINE_CHUNK_CHARS {
      out.push(std::mem::take(&mut current));
      current_len = 0;
    }
    if !current.is_empty() {
      current.push('\n');
      current_len += 1;
    }
    current.push_str(line);
    current_len += line_len;
  }
  if !current.is_empty() {
    out.push(current);
  }
  out
}
