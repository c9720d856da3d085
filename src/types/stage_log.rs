//! DTOs for stage_log.json: one entry per executed stage, for debugging runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded stage execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageLogEntry {
  /// 1-based step index.
  pub step: u32,
  /// Stage that was executed.
  pub stage: String,
  pub started_at: DateTime<Utc>,
  pub latency_ms: u64,
  /// Successor looked up after the stage ran (None when the chain ended).
  pub next_stage: Option<String>,
  /// Length of `errors` after merging this stage's update.
  pub errors_after: usize,
  /// Length of `evolved_questions` after merging this stage's update.
  pub evolved_questions_after: usize,
}

/// Root structure for stage_log.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageLog {
  /// Log format version.
  pub version: u32,
  pub started_at: DateTime<Utc>,
  /// None while the run is still in progress.
  pub finished_at: Option<DateTime<Utc>>,
  pub completed_stages: Vec<String>,
  pub steps: Vec<StageLogEntry>,
}

impl StageLog {
  pub const VERSION: u32 = 1;

  pub fn start() -> Self {
    Self {
      version: Self::VERSION,
      started_at: Utc::now(),
      finished_at: None,
      completed_stages: vec![],
      steps: vec![],
    }
  }

  pub fn record(&mut self, entry: StageLogEntry) {
    self.completed_stages.push(entry.stage.clone());
    self.steps.push(entry);
  }

  pub fn finish(&mut self) {
    self.finished_at = Some(Utc::now());
  }
}
