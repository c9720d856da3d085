//! # evolweave
//!
//! Evol-Instruct style synthetic data from documents: seed questions are
//! extracted per document, evolved into harder variants, answered, and paired
//! with retrieved passages.
//!
//! ## Architecture
//!
//! A [StageGraph] runs six [Stage]s in a fixed chain over a shared
//! [PipelineState]:
//!
//! `process_documents -> simple_evolution -> multi_context_evolution ->
//! reasoning_evolution -> generate_answers -> retrieve_contexts`
//!
//! Every model call goes through the [TextCompletion] trait;
//! [ChatCompletionClient] implements it for OpenAI-compatible endpoints.
//! [EvolPipeline] is the entry point and returns a [GenerationResult].

pub mod chat_client;
pub mod completion;
pub mod config;
#[cfg(test)]
mod config_test;
pub mod graph;
#[cfg(test)]
mod graph_test;
pub mod passage;
pub mod pipeline;
pub mod preamble;
pub mod prompts;
pub mod stage_log_io;
pub mod stages;
#[cfg(test)]
mod test_support;
pub mod text;
pub mod types;

pub use chat_client::ChatCompletionClient;
pub use completion::{CompletionError, TextCompletion};
pub use config::{CompletionConfig, ConfigError};
pub use graph::{END, GraphError, Stage, StageGraph, stage_fn};
pub use passage::extract_passages;
pub use pipeline::{EvolPipeline, PipelineError, evolution_graph};
pub use types::{
  Document, EvolutionKind, EvolvedQuestion, GenerationResult, PipelineState, ProcessedDocument,
  QuestionAnswer, QuestionContext, StageLog, StateUpdate,
};
