//! Context retrieval: heuristic passages for every evolved question. No model calls.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::graph::Stage;
use crate::passage::{MAX_PASSAGES, extract_passages};
use crate::types::{EvolvedQuestion, PASSAGE_RELEVANCE, PipelineState, QuestionContext, StateUpdate};

#[derive(Debug, Default)]
pub struct ContextRetrievalStage;

impl ContextRetrievalStage {
  pub fn new() -> Self {
    Self
  }
}

/// Passages from each source document in order, capped at three overall.
fn contexts_for(state: &PipelineState, question: &EvolvedQuestion) -> QuestionContext {
  let mut qc = QuestionContext::new(question.id.as_str());
  for id in &question.source_document_ids {
    let Some(doc) = state.processed_document(id) else {
      continue;
    };
    for passage in extract_passages(&question.question_text, &doc.content)
      .into_iter()
      .take(MAX_PASSAGES)
    {
      if !qc.push(passage, PASSAGE_RELEVANCE, doc.id.as_str()) {
        break;
      }
    }
    if qc.is_full() {
      break;
    }
  }
  qc
}

#[async_trait]
impl Stage for ContextRetrievalStage {
  #[instrument(level = "trace", skip(self, state))]
  async fn run(&self, state: &PipelineState) -> StateUpdate {
    let contexts: Vec<QuestionContext> = state
      .evolved_questions
      .iter()
      .map(|q| contexts_for(state, q))
      .filter(|qc| !qc.is_empty())
      .collect();

    info!(questions_with_context = contexts.len(), "context retrieval complete");
    StateUpdate::new().question_contexts(contexts)
  }
}
