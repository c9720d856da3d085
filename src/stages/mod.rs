//! The six pipeline stages, in execution order.
//!
//! Every stage walks its items one at a time (one in-flight completion call),
//! keeps input order in its output, and turns per-item failures into strings in
//! `errors` instead of aborting.

mod answer_generation;
mod context_retrieval;
mod document_processing;
mod multi_context_evolution;
mod reasoning_evolution;
mod simple_evolution;

use std::fmt;

use thiserror::Error;
use tracing::warn;

use crate::completion::{CompletionError, TextCompletion};

pub use answer_generation::{ANSWER_CONTEXT_CHARS, AnswerGenerationStage};
pub use context_retrieval::ContextRetrievalStage;
pub use document_processing::{
  DocumentProcessingStage, FALLBACK_SEED_QUESTION, MAX_SEED_QUESTIONS, SEED_CONTENT_CHARS,
  parse_seed_questions,
};
pub use multi_context_evolution::{MULTI_CONTEXT_CHARS, MultiContextEvolutionStage};
pub use reasoning_evolution::{REASONING_CANDIDATES, REASONING_CONTEXT_CHARS, ReasoningEvolutionStage};
pub use simple_evolution::{SIMPLE_CONTEXT_CHARS, SimpleEvolutionStage};

/// Failure of one item (document, question or pair) inside a stage.
#[derive(Error, Debug)]
#[error("{what}: {cause}")]
pub struct ItemError {
  what: String,
  cause: String,
}

impl ItemError {
  pub fn new(what: impl Into<String>, cause: impl fmt::Display) -> Self {
    Self {
      what: what.into(),
      cause: cause.to_string(),
    }
  }
}

/// Outcome of processing one item.
pub type ItemResult<T> = Result<T, ItemError>;

/// Appends `message` to the run's error list and logs it.
pub(crate) fn record_error(errors: &mut Vec<String>, message: String) {
  warn!(error = %message, "recorded processing error");
  errors.push(message);
}

/// Keeps the successes in order and records every failure into `errors`.
pub(crate) fn collect_item<T>(result: ItemResult<T>, errors: &mut Vec<String>) -> Option<T> {
  match result {
    Ok(value) => Some(value),
    Err(e) => {
      record_error(errors, e.to_string());
      None
    }
  }
}

/// One completion call; a blank reply counts as [CompletionError::EmptyResponse].
pub(crate) async fn complete_trimmed(
  llm: &dyn TextCompletion,
  prompt: &str,
) -> Result<String, CompletionError> {
  let text = llm.complete(prompt).await?;
  let text = text.trim();
  if text.is_empty() {
    return Err(CompletionError::EmptyResponse);
  }
  Ok(text.to_string())
}
