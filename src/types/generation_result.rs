//! Result record returned to callers of the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EvolutionKind, EvolvedQuestion, PipelineState, QuestionAnswer, QuestionContext};

/// Number of evolved questions per [EvolutionKind].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionKindCounts {
  pub simple: usize,
  pub multi_context: usize,
  pub reasoning: usize,
}

impl EvolutionKindCounts {
  pub fn tally(questions: &[EvolvedQuestion]) -> Self {
    let mut counts = Self::default();
    for q in questions {
      match q.evolution_kind {
        EvolutionKind::Simple => counts.simple += 1,
        EvolutionKind::MultiContext => counts.multi_context += 1,
        EvolutionKind::Reasoning => counts.reasoning += 1,
      }
    }
    counts
  }

  pub fn total(&self) -> usize {
    self.simple + self.multi_context + self.reasoning
  }
}

/// Summary computed once the graph has finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
  pub total_questions: usize,
  pub evolution_kind_counts: EvolutionKindCounts,
  pub processing_errors: Vec<String>,
  pub generation_timestamp: DateTime<Utc>,
}

/// The only shape produced by a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
  pub evolved_questions: Vec<EvolvedQuestion>,
  pub question_answers: Vec<QuestionAnswer>,
  pub question_contexts: Vec<QuestionContext>,
  pub generation_metadata: GenerationMetadata,
}

impl From<PipelineState> for GenerationResult {
  fn from(state: PipelineState) -> Self {
    let generation_metadata = GenerationMetadata {
      total_questions: state.evolved_questions.len(),
      evolution_kind_counts: EvolutionKindCounts::tally(&state.evolved_questions),
      processing_errors: state.errors,
      generation_timestamp: Utc::now(),
    };
    Self {
      evolved_questions: state.evolved_questions,
      question_answers: state.question_answers,
      question_contexts: state.question_contexts,
      generation_metadata,
    }
  }
}
