//! Answer generation: one grounded answer per evolved question.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::{ItemError, collect_item, complete_trimmed};
use crate::completion::TextCompletion;
use crate::graph::Stage;
use crate::prompts;
use crate::text::truncate_chars;
use crate::types::{ANSWER_CONFIDENCE, EvolvedQuestion, PipelineState, QuestionAnswer, StateUpdate};

/// Characters of combined source content sent with each answer prompt.
pub const ANSWER_CONTEXT_CHARS: usize = 2000;

pub struct AnswerGenerationStage {
  llm: Arc<dyn TextCompletion>,
}

impl AnswerGenerationStage {
  pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
    Self { llm }
  }

  async fn answer(&self, question: &EvolvedQuestion, context: &str) -> Result<QuestionAnswer, ItemError> {
    let prompt = prompts::answer(&question.question_text, context);
    let answer_text = complete_trimmed(self.llm.as_ref(), &prompt).await.map_err(|e| {
      ItemError::new(
        format!("Answer generation failed for question {}", question.id),
        e,
      )
    })?;
    Ok(QuestionAnswer {
      question_id: question.id.clone(),
      answer_text,
      confidence_score: ANSWER_CONFIDENCE,
      source_document_ids: question.source_document_ids.clone(),
    })
  }
}

/// Contents of every resolvable source document, blank-line joined. None when nothing resolves.
fn combined_context(state: &PipelineState, question: &EvolvedQuestion) -> Option<String> {
  let contents: Vec<&str> = question
    .source_document_ids
    .iter()
    .filter_map(|id| state.processed_document(id))
    .map(|d| d.content.as_str())
    .collect();
  if contents.is_empty() {
    return None;
  }
  Some(truncate_chars(&contents.join("\n\n"), ANSWER_CONTEXT_CHARS).to_string())
}

#[async_trait]
impl Stage for AnswerGenerationStage {
  #[instrument(level = "trace", skip(self, state))]
  async fn run(&self, state: &PipelineState) -> StateUpdate {
    let mut errors = state.errors.clone();
    let mut answers = Vec::with_capacity(state.evolved_questions.len());

    for question in &state.evolved_questions {
      let Some(context) = combined_context(state, question) else {
        debug!(question_id = %question.id, "no resolvable source documents, skipping");
        continue;
      };
      if let Some(a) = collect_item(self.answer(question, &context).await, &mut errors) {
        answers.push(a);
      }
    }

    info!(answers = answers.len(), "answer generation complete");
    StateUpdate::new().question_answers(answers).errors(errors)
  }
}
