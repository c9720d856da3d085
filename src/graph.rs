//! Sequential stage runner: a linear chain of named stages over a shared state.
//!
//! Each stage reads the merged [PipelineState] and returns a [StateUpdate];
//! the runner merges it and moves to the successor registered with
//! [StageGraph::add_edge]. The run ends at [END] or at a stage with no
//! outgoing edge.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument};

use crate::types::{PipelineState, StageLog, StageLogEntry, StateUpdate};

/// Terminal marker usable as an edge target.
pub const END: &str = "__end__";

/// Upper bound on executed stages per run; guards against edge cycles.
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Configuration faults of a [StageGraph]. These are defects, never runtime conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
  #[error("stage not registered: {0}")]
  UnknownStage(String),

  #[error("stage already registered: {0}")]
  DuplicateStage(String),

  #[error("stage {from} already has a successor")]
  DuplicateEdge { from: String },

  #[error("no start stage set")]
  MissingStart,

  #[error("max steps exceeded ({0})")]
  MaxStepsExceeded(usize),
}

/// One unit of pipeline work.
///
/// Stages do not fail: per-item problems are appended to `errors` in the
/// returned update, and whatever partial result exists is still returned.
#[async_trait]
pub trait Stage: Send + Sync {
  async fn run(&self, state: &PipelineState) -> StateUpdate;
}

/// Adapter turning an async closure into a [Stage].
pub struct FnStage<F>(F);

/// Wraps `f` as a [Stage]. The closure receives a snapshot of the state.
pub fn stage_fn<F, Fut>(f: F) -> FnStage<F>
where
  F: Fn(PipelineState) -> Fut + Send + Sync,
  Fut: Future<Output = StateUpdate> + Send,
{
  FnStage(f)
}

#[async_trait]
impl<F, Fut> Stage for FnStage<F>
where
  F: Fn(PipelineState) -> Fut + Send + Sync,
  Fut: Future<Output = StateUpdate> + Send,
{
  async fn run(&self, state: &PipelineState) -> StateUpdate {
    (self.0)(state.clone()).await
  }
}

/// A linear chain of named stages.
pub struct StageGraph {
  stages: HashMap<String, Arc<dyn Stage>>,
  edges: HashMap<String, String>,
  start: Option<String>,
  max_steps: usize,
}

impl Default for StageGraph {
  fn default() -> Self {
    Self::new()
  }
}

impl StageGraph {
  pub fn new() -> Self {
    Self {
      stages: HashMap::new(),
      edges: HashMap::new(),
      start: None,
      max_steps: DEFAULT_MAX_STEPS,
    }
  }

  pub fn with_max_steps(mut self, max_steps: usize) -> Self {
    self.max_steps = max_steps;
    self
  }

  /// Registers `stage` under `name`.
  pub fn add_node(&mut self, name: impl Into<String>, stage: impl Stage + 'static) -> Result<(), GraphError> {
    let name = name.into();
    if self.stages.contains_key(&name) {
      return Err(GraphError::DuplicateStage(name));
    }
    self.stages.insert(name, Arc::new(stage));
    Ok(())
  }

  /// Registers `to` as the single successor of `from`. `to` may be [END].
  pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> Result<(), GraphError> {
    let from = from.into();
    if self.edges.contains_key(&from) {
      return Err(GraphError::DuplicateEdge { from });
    }
    self.edges.insert(from, to.into());
    Ok(())
  }

  pub fn set_start(&mut self, name: impl Into<String>) {
    self.start = Some(name.into());
  }

  /// Registered stage names, sorted.
  pub fn stage_names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.stages.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }

  /// Successor of `name`, or None when `name` is the last stage.
  pub fn successor(&self, name: &str) -> Option<&str> {
    self
      .edges
      .get(name)
      .map(String::as_str)
      .filter(|next| *next != END)
  }

  /// Checks that the start stage and every edge endpoint are registered.
  pub fn validate(&self) -> Result<(), GraphError> {
    let start = self.start.as_deref().ok_or(GraphError::MissingStart)?;
    self.require(start)?;
    let mut edges: Vec<(&String, &String)> = self.edges.iter().collect();
    edges.sort();
    for (from, to) in edges {
      self.require(from)?;
      if to != END {
        self.require(to)?;
      }
    }
    Ok(())
  }

  fn require(&self, name: &str) -> Result<(), GraphError> {
    if self.stages.contains_key(name) {
      Ok(())
    } else {
      Err(GraphError::UnknownStage(name.to_string()))
    }
  }

  /// Runs the chain from the start stage and returns the final merged state.
  pub async fn invoke(&self, initial: PipelineState) -> Result<PipelineState, GraphError> {
    self.run_chain(initial, None).await
  }

  /// Like [StageGraph::invoke], also recording one [StageLogEntry] per stage into `log`.
  pub async fn invoke_logged(
    &self,
    initial: PipelineState,
    log: &mut StageLog,
  ) -> Result<PipelineState, GraphError> {
    let result = self.run_chain(initial, Some(log)).await;
    log.finish();
    result
  }

  #[instrument(level = "trace", skip(self, state, log))]
  async fn run_chain(
    &self,
    mut state: PipelineState,
    mut log: Option<&mut StageLog>,
  ) -> Result<PipelineState, GraphError> {
    self.validate()?;
    let mut current = self.start.clone().ok_or(GraphError::MissingStart)?;
    let mut step: usize = 0;

    loop {
      if step >= self.max_steps {
        return Err(GraphError::MaxStepsExceeded(self.max_steps));
      }
      step += 1;

      let stage = self
        .stages
        .get(&current)
        .ok_or_else(|| GraphError::UnknownStage(current.clone()))?;

      info!(stage = %current, step = step, "executing stage");
      let started_at = Utc::now();
      let timer = Instant::now();
      let update = stage.run(&state).await;
      state.apply(update);
      let latency_ms = timer.elapsed().as_millis() as u64;

      let next = self.successor(&current).map(String::from);
      info!(
        stage = %current,
        latency_ms = latency_ms,
        errors = state.errors.len(),
        evolved_questions = state.evolved_questions.len(),
        "stage complete"
      );

      if let Some(log) = log.as_mut() {
        log.record(StageLogEntry {
          step: step as u32,
          stage: current.clone(),
          started_at,
          latency_ms,
          next_stage: next.clone(),
          errors_after: state.errors.len(),
          evolved_questions_after: state.evolved_questions.len(),
        });
      }

      match next {
        Some(next) => current = next,
        None => {
          info!(steps = step, "stage chain complete");
          return Ok(state);
        }
      }
    }
  }
}
