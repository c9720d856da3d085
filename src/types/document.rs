//! An input document handed to the pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw document text plus caller-supplied metadata. Already validated upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
  pub text: String,
  #[serde(default)]
  pub metadata: HashMap<String, serde_json::Value>,
}

impl Document {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      metadata: HashMap::new(),
    }
  }

  pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
    self.metadata.insert(key.into(), value.into());
    self
  }
}
