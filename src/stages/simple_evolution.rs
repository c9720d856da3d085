//! Simple evolution: deepen every seed question against its own document.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use super::{ItemError, collect_item, complete_trimmed};
use crate::completion::TextCompletion;
use crate::graph::Stage;
use crate::prompts;
use crate::text::truncate_chars;
use crate::types::{
  EvolutionKind, EvolvedQuestion, PipelineState, ProcessedDocument, QuestionMetadata, StateUpdate,
};

/// Characters of document content sent with each simple-evolution prompt.
pub const SIMPLE_CONTEXT_CHARS: usize = 1000;

pub struct SimpleEvolutionStage {
  llm: Arc<dyn TextCompletion>,
}

impl SimpleEvolutionStage {
  pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
    Self { llm }
  }

  async fn evolve(&self, doc: &ProcessedDocument, seed: &str) -> Result<EvolvedQuestion, ItemError> {
    let prompt = prompts::simple_evolution(seed, truncate_chars(&doc.content, SIMPLE_CONTEXT_CHARS));
    let text = complete_trimmed(self.llm.as_ref(), &prompt)
      .await
      .map_err(|e| ItemError::new(format!("Simple evolution failed for {} question {:?}", doc.id, seed), e))?;
    Ok(EvolvedQuestion::new(
      text,
      EvolutionKind::Simple,
      vec![doc.id.clone()],
      QuestionMetadata::evolved_from(seed),
    ))
  }
}

#[async_trait]
impl Stage for SimpleEvolutionStage {
  #[instrument(level = "trace", skip(self, state))]
  async fn run(&self, state: &PipelineState) -> StateUpdate {
    let mut errors = state.errors.clone();
    let mut questions = state.evolved_questions.clone();
    let before = questions.len();

    for doc in &state.processed_documents {
      for seed in &doc.seed_questions {
        if let Some(q) = collect_item(self.evolve(doc, seed).await, &mut errors) {
          questions.push(q);
        }
      }
    }

    info!(added = questions.len() - before, "simple evolution complete");
    StateUpdate::new().evolved_questions(questions).errors(errors)
  }
}
