//! A question produced by one of the evolution stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EvolutionKind;

/// Provenance attached to an evolved question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionMetadata {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original_question: Option<String>,
  pub evolution_timestamp: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub requires_reasoning: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub requires_multiple_contexts: Option<bool>,
}

impl QuestionMetadata {
  pub fn evolved_from(original_question: impl Into<String>) -> Self {
    Self {
      original_question: Some(original_question.into()),
      evolution_timestamp: Utc::now(),
      requires_reasoning: None,
      requires_multiple_contexts: None,
    }
  }
}

/// A question produced by one of the evolution stages.
///
/// `source_document_ids` is never empty and only names documents that were
/// processed when the question was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolvedQuestion {
  pub id: String,
  pub question_text: String,
  pub evolution_kind: EvolutionKind,
  pub complexity_score: f64,
  pub source_document_ids: Vec<String>,
  pub metadata: QuestionMetadata,
}

impl EvolvedQuestion {
  /// Creates a question with a fresh UUID and the kind's fixed complexity score.
  pub fn new(
    question_text: impl Into<String>,
    evolution_kind: EvolutionKind,
    source_document_ids: Vec<String>,
    metadata: QuestionMetadata,
  ) -> Self {
    Self {
      id: uuid::Uuid::new_v4().to_string(),
      question_text: question_text.into(),
      evolution_kind,
      complexity_score: evolution_kind.complexity_score(),
      source_document_ids,
      metadata,
    }
  }
}
