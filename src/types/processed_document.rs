//! A document that survived extraction, with its seed questions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Prefix of every processed document id (`doc_0`, `doc_1`, ...).
pub const DOCUMENT_ID_PREFIX: &str = "doc_";

/// A document that survived extraction. `id` is the foreign key used by every later stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocument {
  pub id: String,
  pub content: String,
  pub metadata: HashMap<String, serde_json::Value>,
  pub seed_questions: Vec<String>,
}

impl ProcessedDocument {
  /// Builds the id for the `index`-th surviving document.
  pub fn id_for(index: usize) -> String {
    format!("{}{}", DOCUMENT_ID_PREFIX, index)
  }
}
