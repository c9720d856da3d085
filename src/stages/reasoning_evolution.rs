//! Reasoning evolution: re-evolve the first questions into reasoning-heavy variants.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::{ItemError, collect_item, complete_trimmed};
use crate::completion::TextCompletion;
use crate::graph::Stage;
use crate::prompts;
use crate::text::truncate_chars;
use crate::types::{
  EvolutionKind, EvolvedQuestion, PipelineState, ProcessedDocument, QuestionMetadata, StateUpdate,
};

/// Only this many leading evolved questions are re-evolved, whatever their kind.
pub const REASONING_CANDIDATES: usize = 2;
pub const REASONING_CONTEXT_CHARS: usize = 1000;

pub struct ReasoningEvolutionStage {
  llm: Arc<dyn TextCompletion>,
}

impl ReasoningEvolutionStage {
  pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
    Self { llm }
  }

  async fn evolve(
    &self,
    original: &EvolvedQuestion,
    doc: &ProcessedDocument,
  ) -> Result<EvolvedQuestion, ItemError> {
    let prompt = prompts::reasoning_evolution(
      &original.question_text,
      truncate_chars(&doc.content, REASONING_CONTEXT_CHARS),
    );
    let text = complete_trimmed(self.llm.as_ref(), &prompt).await.map_err(|e| {
      ItemError::new(
        format!("Reasoning evolution failed for question {}", original.id),
        e,
      )
    })?;
    Ok(EvolvedQuestion::new(
      text,
      EvolutionKind::Reasoning,
      original.source_document_ids.clone(),
      QuestionMetadata {
        requires_reasoning: Some(true),
        ..QuestionMetadata::evolved_from(original.question_text.as_str())
      },
    ))
  }
}

/// First processed document whose id appears in `question`'s sources.
fn source_document<'a>(
  state: &'a PipelineState,
  question: &EvolvedQuestion,
) -> Option<&'a ProcessedDocument> {
  state
    .processed_documents
    .iter()
    .find(|d| question.source_document_ids.contains(&d.id))
}

#[async_trait]
impl Stage for ReasoningEvolutionStage {
  #[instrument(level = "trace", skip(self, state))]
  async fn run(&self, state: &PipelineState) -> StateUpdate {
    let mut errors = state.errors.clone();
    let mut questions = state.evolved_questions.clone();
    let before = questions.len();

    for candidate in state.evolved_questions.iter().take(REASONING_CANDIDATES) {
      let Some(doc) = source_document(state, candidate) else {
        debug!(question_id = %candidate.id, "no source document, skipping");
        continue;
      };
      if let Some(q) = collect_item(self.evolve(candidate, doc).await, &mut errors) {
        questions.push(q);
      }
    }

    info!(added = questions.len() - before, "reasoning evolution complete");
    StateUpdate::new().evolved_questions(questions).errors(errors)
  }
}
