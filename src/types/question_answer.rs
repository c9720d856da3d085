//! An answer generated for one evolved question.

use serde::{Deserialize, Serialize};

/// Heuristic confidence attached to every generated answer. Not model-calibrated.
pub const ANSWER_CONFIDENCE: f64 = 0.85;

/// An answer generated for one evolved question (at most one per question).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
  pub question_id: String,
  pub answer_text: String,
  pub confidence_score: f64,
  pub source_document_ids: Vec<String>,
}
