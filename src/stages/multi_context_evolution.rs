//! Multi-context evolution: one question per adjacent document pair.
//!
//! Document `i` is paired only with `i + 1`; the first seed question of the
//! first member is rewritten to need both contents.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use super::{ItemError, collect_item, complete_trimmed, record_error};
use crate::completion::TextCompletion;
use crate::graph::Stage;
use crate::prompts;
use crate::text::truncate_chars;
use crate::types::{
  EvolutionKind, EvolvedQuestion, PipelineState, ProcessedDocument, QuestionMetadata, StateUpdate,
};

/// Characters of each document's content sent with the prompt.
pub const MULTI_CONTEXT_CHARS: usize = 800;

pub struct MultiContextEvolutionStage {
  llm: Arc<dyn TextCompletion>,
}

impl MultiContextEvolutionStage {
  pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
    Self { llm }
  }

  async fn evolve(
    &self,
    first: &ProcessedDocument,
    second: &ProcessedDocument,
    seed: &str,
  ) -> Result<EvolvedQuestion, ItemError> {
    let prompt = prompts::multi_context_evolution(
      seed,
      truncate_chars(&first.content, MULTI_CONTEXT_CHARS),
      truncate_chars(&second.content, MULTI_CONTEXT_CHARS),
    );
    let text = complete_trimmed(self.llm.as_ref(), &prompt).await.map_err(|e| {
      ItemError::new(
        format!("Multi-context evolution failed for {} + {}", first.id, second.id),
        e,
      )
    })?;
    Ok(EvolvedQuestion::new(
      text,
      EvolutionKind::MultiContext,
      vec![first.id.clone(), second.id.clone()],
      QuestionMetadata {
        requires_multiple_contexts: Some(true),
        ..QuestionMetadata::evolved_from(seed)
      },
    ))
  }
}

#[async_trait]
impl Stage for MultiContextEvolutionStage {
  #[instrument(level = "trace", skip(self, state))]
  async fn run(&self, state: &PipelineState) -> StateUpdate {
    let mut errors = state.errors.clone();
    let docs = &state.processed_documents;

    if docs.len() < 2 {
      record_error(
        &mut errors,
        format!(
          "Multi-context evolution requires at least 2 processed documents (found {})",
          docs.len()
        ),
      );
      return StateUpdate::new().errors(errors);
    }

    let mut questions = state.evolved_questions.clone();
    let before = questions.len();
    for pair in docs.windows(2) {
      let (first, second) = (&pair[0], &pair[1]);
      let Some(seed) = first.seed_questions.first() else {
        continue;
      };
      if let Some(q) = collect_item(self.evolve(first, second, seed).await, &mut errors) {
        questions.push(q);
      }
    }

    info!(added = questions.len() - before, "multi-context evolution complete");
    StateUpdate::new().evolved_questions(questions).errors(errors)
  }
}
