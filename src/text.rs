//! Character-based text helpers. Limits in this crate count chars, not bytes.

/// Returns at most the first `max_chars` characters of `s`, never splitting a char.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
  match s.char_indices().nth(max_chars) {
    Some((idx, _)) => &s[..idx],
    None => s,
  }
}

/// Number of characters (Unicode scalar values) in `s`.
pub fn char_len(s: &str) -> usize {
  s.chars().count()
}

/// Splits `s` into consecutive slices of `size` characters; the last may be shorter.
pub fn char_slices(s: &str, size: usize) -> Vec<&str> {
  if size == 0 {
    return vec![];
  }
  let mut out = Vec::new();
  let mut start = 0;
  let mut count = 0;
  for (idx, _) in s.char_indices() {
    if count == size {
      out.push(&s[start..idx]);
      start = idx;
      count = 0;
    }
    count += 1;
  }
  if start < s.len() {
    out.push(&s[start..]);
  }
  out
}
