//! Retrieved passages for one evolved question.

use serde::{Deserialize, Serialize};

/// Heuristic relevance attached to every retrieved passage.
pub const PASSAGE_RELEVANCE: f64 = 0.8;

/// Maximum number of contexts kept per question.
pub const MAX_CONTEXTS: usize = 3;

/// Retrieved passages for one evolved question.
///
/// `contexts`, `relevance_scores` and `context_sources` are parallel and always
/// the same length (at most [MAX_CONTEXTS]); only [QuestionContext::push] grows them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContext {
  pub question_id: String,
  pub contexts: Vec<String>,
  pub relevance_scores: Vec<f64>,
  pub context_sources: Vec<String>,
}

impl QuestionContext {
  pub fn new(question_id: impl Into<String>) -> Self {
    Self {
      question_id: question_id.into(),
      ..Self::default()
    }
  }

  /// Appends one passage. Returns false (and drops it) once [MAX_CONTEXTS] is reached.
  pub fn push(&mut self, passage: String, relevance: f64, source_id: impl Into<String>) -> bool {
    if self.is_full() {
      return false;
    }
    self.contexts.push(passage);
    self.relevance_scores.push(relevance);
    self.context_sources.push(source_id.into());
    true
  }

  pub fn is_full(&self) -> bool {
    self.contexts.len() >= MAX_CONTEXTS
  }

  pub fn len(&self) -> usize {
    self.contexts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.contexts.is_empty()
  }
}
