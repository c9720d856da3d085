//! Pipeline data model: inputs, the shared state, and the result record.
//!
//! Every stage reads a [PipelineState] and returns a [StateUpdate]; the runner
//! merges the update before moving on.

mod document;
mod evolution_kind;
mod evolved_question;
#[cfg(test)]
mod evolved_question_test;
mod generation_result;
mod pipeline_state;
mod processed_document;
mod question_answer;
mod question_context;
mod stage_log;

pub use document::Document;
pub use evolution_kind::EvolutionKind;
pub use evolved_question::{EvolvedQuestion, QuestionMetadata};
pub use generation_result::{EvolutionKindCounts, GenerationMetadata, GenerationResult};
pub use pipeline_state::{PipelineState, StateUpdate};
pub use processed_document::{DOCUMENT_ID_PREFIX, ProcessedDocument};
pub use question_answer::{ANSWER_CONFIDENCE, QuestionAnswer};
pub use question_context::{MAX_CONTEXTS, PASSAGE_RELEVANCE, QuestionContext};
pub use stage_log::{StageLog, StageLogEntry};
