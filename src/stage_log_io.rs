//! Stage log save/load (JSON), for inspecting what a run did.

use std::path::Path;

use tracing::instrument;

use crate::types::StageLog;

/// Default filename for a stage log under a run directory.
pub const STAGE_LOG_FILENAME: &str = "stage_log.json";

/// Writes `log` to `path` as pretty JSON. Creates the parent directory if needed.
#[instrument(level = "trace", skip(path, log))]
pub fn save_stage_log(path: &Path, log: &StageLog) -> Result<(), std::io::Error> {
  let json = serde_json::to_string_pretty(log)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)
}

/// Loads a stage log from `path`. Returns error if file is missing or invalid JSON.
#[instrument(level = "trace", skip(path))]
pub fn load_stage_log(path: &Path) -> Result<StageLog, std::io::Error> {
  let bytes = std::fs::read(path)?;
  serde_json::from_slice(&bytes)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
  use super::{STAGE_LOG_FILENAME, load_stage_log, save_stage_log};
  use crate::types::{StageLog, StageLogEntry};
  use chrono::Utc;

  #[test]
  fn save_creates_parent_and_load_reads_back() {
    let mut log = StageLog::start();
    log.record(StageLogEntry {
      step: 1,
      stage: "process_documents".to_string(),
      started_at: Utc::now(),
      latency_ms: 12,
      next_stage: Some("simple_evolution".to_string()),
      errors_after: 1,
      evolved_questions_after: 0,
    });
    log.finish();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run").join(STAGE_LOG_FILENAME);
    save_stage_log(&path, &log).expect("save");
    let loaded = load_stage_log(&path).expect("load");
    assert_eq!(loaded, log);
    assert_eq!(loaded.completed_stages, vec!["process_documents"]);
  }

  #[test]
  fn load_rejects_missing_and_invalid_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.json");
    assert_eq!(
      load_stage_log(&missing).unwrap_err().kind(),
      std::io::ErrorKind::NotFound
    );
    let bad = dir.path().join(STAGE_LOG_FILENAME);
    std::fs::write(&bad, "{not json").unwrap();
    assert_eq!(
      load_stage_log(&bad).unwrap_err().kind(),
      std::io::ErrorKind::InvalidData
    );
  }
}
