//! Document processing: assigns ids and derives seed questions per document.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::{ItemError, ItemResult, collect_item, record_error};
use crate::completion::TextCompletion;
use crate::graph::Stage;
use crate::preamble::{PreambleRules, strip_preamble};
use crate::prompts;
use crate::text::truncate_chars;
use crate::types::{Document, PipelineState, ProcessedDocument, StateUpdate};

/// Characters of (preamble-stripped) document text sent with the seed prompt.
pub const SEED_CONTENT_CHARS: usize = 4000;
pub const MAX_SEED_QUESTIONS: usize = 3;
/// Used when the model yields no usable question or the call fails.
pub const FALLBACK_SEED_QUESTION: &str = "What is the main topic discussed in this document?";

/// Turns `documents` into `processed_documents`, one seed-question call per document.
pub struct DocumentProcessingStage {
  llm: Arc<dyn TextCompletion>,
}

impl DocumentProcessingStage {
  pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
    Self { llm }
  }

  /// Seed questions for `content`; the fallback question on failure plus the error.
  async fn seed_questions(&self, doc_id: &str, content: &str) -> (Vec<String>, Option<ItemError>) {
    let stripped = strip_preamble(content, PreambleRules::Seed);
    let source = if stripped.trim().is_empty() { content } else { stripped };
    let prompt = prompts::seed_questions(truncate_chars(source, SEED_CONTENT_CHARS));

    match self.llm.complete(&prompt).await {
      Ok(response) => {
        let questions = parse_seed_questions(&response);
        if questions.is_empty() {
          debug!(doc_id, "no usable seed questions, using fallback");
          (vec![FALLBACK_SEED_QUESTION.to_string()], None)
        } else {
          (questions, None)
        }
      }
      Err(e) => (
        vec![FALLBACK_SEED_QUESTION.to_string()],
        Some(ItemError::new(
          format!("Seed question generation failed for {}", doc_id),
          e,
        )),
      ),
    }
  }
}

/// Trimmed lines ending in `?`, at most [MAX_SEED_QUESTIONS].
pub fn parse_seed_questions(response: &str) -> Vec<String> {
  response
    .lines()
    .map(str::trim)
    .filter(|l| l.ends_with('?'))
    .take(MAX_SEED_QUESTIONS)
    .map(String::from)
    .collect()
}

/// Text of the document at `index`, or why it cannot be processed.
fn document_content(index: usize, doc: &Document) -> ItemResult<&str> {
  if doc.text.trim().is_empty() {
    return Err(ItemError::new(
      format!("Failed to process document {}", index),
      "document has no extractable text",
    ));
  }
  Ok(&doc.text)
}

#[async_trait]
impl Stage for DocumentProcessingStage {
  #[instrument(level = "trace", skip(self, state))]
  async fn run(&self, state: &PipelineState) -> StateUpdate {
    info!(documents = state.documents.len(), "processing documents");
    let mut errors = state.errors.clone();
    let mut processed: Vec<ProcessedDocument> = Vec::with_capacity(state.documents.len());

    for (index, doc) in state.documents.iter().enumerate() {
      let Some(content) = collect_item(document_content(index, doc), &mut errors) else {
        continue;
      };
      let id = ProcessedDocument::id_for(processed.len());
      let (seed_questions, seed_error) = self.seed_questions(&id, content).await;
      if let Some(e) = seed_error {
        record_error(&mut errors, e.to_string());
      }
      debug!(doc_id = %id, seeds = seed_questions.len(), "document processed");
      processed.push(ProcessedDocument {
        id,
        content: content.to_string(),
        metadata: doc.metadata.clone(),
        seed_questions,
      });
    }

    info!(processed = processed.len(), "documents processed");
    StateUpdate::new()
      .processed_documents(processed)
      .errors(errors)
  }
}
