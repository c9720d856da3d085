//! Which evolution pass produced a question.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which evolution pass produced a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionKind {
  Simple,
  MultiContext,
  Reasoning,
}

impl EvolutionKind {
  /// Fixed heuristic complexity assigned to questions of this kind.
  pub fn complexity_score(self) -> f64 {
    match self {
      EvolutionKind::Simple => 5.0,
      EvolutionKind::MultiContext => 7.0,
      EvolutionKind::Reasoning => 8.0,
    }
  }
}

impl fmt::Display for EvolutionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EvolutionKind::Simple => write!(f, "simple"),
      EvolutionKind::MultiContext => write!(f, "multi_context"),
      EvolutionKind::Reasoning => write!(f, "reasoning"),
    }
  }
}
