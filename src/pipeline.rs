//! Pipeline facade: wires the six stages into a [StageGraph] and turns the
//! final state into a [GenerationResult].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::completion::TextCompletion;
use crate::graph::{END, GraphError, StageGraph};
use crate::stages::{
  AnswerGenerationStage, ContextRetrievalStage, DocumentProcessingStage, MultiContextEvolutionStage,
  ReasoningEvolutionStage, SimpleEvolutionStage,
};
use crate::types::{Document, GenerationResult, PipelineState, StageLog};

pub const PROCESS_DOCUMENTS: &str = "process_documents";
pub const SIMPLE_EVOLUTION: &str = "simple_evolution";
pub const MULTI_CONTEXT_EVOLUTION: &str = "multi_context_evolution";
pub const REASONING_EVOLUTION: &str = "reasoning_evolution";
pub const GENERATE_ANSWERS: &str = "generate_answers";
pub const RETRIEVE_CONTEXTS: &str = "retrieve_contexts";

/// Stage names in execution order.
pub const STAGE_ORDER: [&str; 6] = [
  PROCESS_DOCUMENTS,
  SIMPLE_EVOLUTION,
  MULTI_CONTEXT_EVOLUTION,
  REASONING_EVOLUTION,
  GENERATE_ANSWERS,
  RETRIEVE_CONTEXTS,
];

/// The only error a pipeline run surfaces. Per-item failures are data in
/// `generation_metadata.processing_errors` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
  #[error("Generation failed: {0}")]
  Generation(String),
}

impl From<GraphError> for PipelineError {
  fn from(e: GraphError) -> Self {
    PipelineError::Generation(e.to_string())
  }
}

/// Builds the standard six-stage chain, every LLM stage sharing `llm`.
pub fn evolution_graph(llm: Arc<dyn TextCompletion>) -> Result<StageGraph, GraphError> {
  let mut graph = StageGraph::new();
  graph.add_node(PROCESS_DOCUMENTS, DocumentProcessingStage::new(llm.clone()))?;
  graph.add_node(SIMPLE_EVOLUTION, SimpleEvolutionStage::new(llm.clone()))?;
  graph.add_node(MULTI_CONTEXT_EVOLUTION, MultiContextEvolutionStage::new(llm.clone()))?;
  graph.add_node(REASONING_EVOLUTION, ReasoningEvolutionStage::new(llm.clone()))?;
  graph.add_node(GENERATE_ANSWERS, AnswerGenerationStage::new(llm))?;
  graph.add_node(RETRIEVE_CONTEXTS, ContextRetrievalStage::new())?;

  for pair in STAGE_ORDER.windows(2) {
    graph.add_edge(pair[0], pair[1])?;
  }
  graph.add_edge(RETRIEVE_CONTEXTS, END)?;
  graph.set_start(PROCESS_DOCUMENTS);
  graph.validate()?;
  Ok(graph)
}

/// Entry point: documents in, [GenerationResult] out.
///
/// Holds no per-run state; concurrent calls to [EvolPipeline::run] do not
/// interact.
pub struct EvolPipeline {
  graph: StageGraph,
}

impl EvolPipeline {
  pub fn new(llm: Arc<dyn TextCompletion>) -> Result<Self, GraphError> {
    Ok(Self::with_graph(evolution_graph(llm)?))
  }

  /// Uses a custom stage chain instead of [evolution_graph].
  pub fn with_graph(graph: StageGraph) -> Self {
    Self { graph }
  }

  /// Runs every stage over `documents`.
  #[instrument(level = "trace", skip(self, documents))]
  pub async fn run(&self, documents: Vec<Document>) -> Result<GenerationResult, PipelineError> {
    info!(documents = documents.len(), "starting generation");
    let state = PipelineState::new(documents);
    let outcome = AssertUnwindSafe(self.graph.invoke(state)).catch_unwind().await;
    finish(outcome)
  }

  /// Like [EvolPipeline::run], also returning a per-stage [StageLog].
  #[instrument(level = "trace", skip(self, documents))]
  pub async fn run_logged(
    &self,
    documents: Vec<Document>,
  ) -> (Result<GenerationResult, PipelineError>, StageLog) {
    info!(documents = documents.len(), "starting generation");
    let mut log = StageLog::start();
    let state = PipelineState::new(documents);
    let outcome = AssertUnwindSafe(self.graph.invoke_logged(state, &mut log))
      .catch_unwind()
      .await;
    (finish(outcome), log)
  }
}

fn finish(
  outcome: Result<Result<PipelineState, GraphError>, Box<dyn Any + Send>>,
) -> Result<GenerationResult, PipelineError> {
  let state = match outcome {
    Ok(Ok(state)) => state,
    Ok(Err(e)) => {
      error!(error = %e, "stage graph failed");
      return Err(e.into());
    }
    Err(payload) => {
      let message = panic_message(payload.as_ref());
      error!(error = %message, "stage panicked");
      return Err(PipelineError::Generation(message));
    }
  };
  let result = GenerationResult::from(state);
  info!(
    total_questions = result.generation_metadata.total_questions,
    answers = result.question_answers.len(),
    contexts = result.question_contexts.len(),
    errors = result.generation_metadata.processing_errors.len(),
    "generation complete"
  );
  Ok(result)
}

/// Text of a panic payload; "unknown error" when it is not a string.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    (*s).to_string()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else {
    "unknown error".to_string()
  }
}
