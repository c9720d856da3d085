//! Tests for `StageGraph`.

use std::sync::{Arc, Mutex};

use crate::graph::{END, GraphError, Stage, StageGraph, stage_fn};
use crate::types::{Document, PipelineState, StageLog, StateUpdate};

/// Stage that appends `tag` to `errors` (used here as a visible trace of execution order).
fn tagging_stage(tag: &'static str) -> impl Stage + 'static {
  stage_fn(move |state: PipelineState| async move {
    let mut errors = state.errors.clone();
    errors.push(tag.to_string());
    StateUpdate::new().errors(errors)
  })
}

fn chain(names: &[&'static str]) -> StageGraph {
  let mut graph = StageGraph::new();
  for name in names {
    graph.add_node(*name, tagging_stage(*name)).unwrap();
  }
  for pair in names.windows(2) {
    graph.add_edge(pair[0], pair[1]).unwrap();
  }
  if let Some(last) = names.last() {
    graph.add_edge(*last, END).unwrap();
  }
  if let Some(first) = names.first() {
    graph.set_start(*first);
  }
  graph
}

#[tokio::test]
async fn runs_stages_in_edge_order() {
  let graph = chain(&["a", "b", "c"]);
  let state = graph.invoke(PipelineState::new(vec![])).await.unwrap();
  assert_eq!(state.errors, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn stops_when_no_outgoing_edge() {
  let mut graph = StageGraph::new();
  graph.add_node("a", tagging_stage("a")).unwrap();
  graph.add_node("b", tagging_stage("b")).unwrap();
  graph.set_start("a");
  let state = graph.invoke(PipelineState::new(vec![])).await.unwrap();
  assert_eq!(state.errors, vec!["a"]);
}

#[tokio::test]
async fn each_stage_sees_predecessor_output() {
  let seen = Arc::new(Mutex::new(Vec::new()));
  let seen_in_stage = Arc::clone(&seen);
  let mut graph = StageGraph::new();
  graph.add_node("first", tagging_stage("first")).unwrap();
  graph
    .add_node(
      "second",
      stage_fn(move |state: PipelineState| {
        let seen = Arc::clone(&seen_in_stage);
        async move {
          seen.lock().unwrap().extend(state.errors.clone());
          StateUpdate::new()
        }
      }),
    )
    .unwrap();
  graph.add_edge("first", "second").unwrap();
  graph.set_start("first");
  graph.invoke(PipelineState::new(vec![])).await.unwrap();
  assert_eq!(*seen.lock().unwrap(), vec!["first".to_string()]);
}

#[tokio::test]
async fn documents_survive_the_run() {
  let graph = chain(&["only"]);
  let state = graph
    .invoke(PipelineState::new(vec![Document::new("text")]))
    .await
    .unwrap();
  assert_eq!(state.documents, vec![Document::new("text")]);
}

#[tokio::test]
async fn unknown_successor_fails_fast() {
  let mut graph = StageGraph::new();
  graph.add_node("a", tagging_stage("a")).unwrap();
  graph.add_edge("a", "missing").unwrap();
  graph.set_start("a");
  let err = graph.invoke(PipelineState::new(vec![])).await.unwrap_err();
  assert_eq!(err, GraphError::UnknownStage("missing".to_string()));
}

#[tokio::test]
async fn unknown_start_fails_fast() {
  let mut graph = StageGraph::new();
  graph.set_start("nowhere");
  let err = graph.invoke(PipelineState::new(vec![])).await.unwrap_err();
  assert_eq!(err, GraphError::UnknownStage("nowhere".to_string()));
}

#[tokio::test]
async fn missing_start_is_an_error() {
  let graph = StageGraph::new();
  let err = graph.invoke(PipelineState::new(vec![])).await.unwrap_err();
  assert_eq!(err, GraphError::MissingStart);
}

#[test]
fn second_edge_from_same_stage_is_rejected() {
  let mut graph = StageGraph::new();
  graph.add_edge("a", "b").unwrap();
  let err = graph.add_edge("a", "c").unwrap_err();
  assert_eq!(err, GraphError::DuplicateEdge { from: "a".to_string() });
}

#[test]
fn duplicate_stage_is_rejected() {
  let mut graph = StageGraph::new();
  graph.add_node("a", tagging_stage("a")).unwrap();
  assert_eq!(
    graph.add_node("a", tagging_stage("a")).unwrap_err(),
    GraphError::DuplicateStage("a".to_string())
  );
}

#[test]
fn successor_treats_end_as_terminal() {
  let graph = chain(&["a", "b"]);
  assert_eq!(graph.successor("a"), Some("b"));
  assert_eq!(graph.successor("b"), None);
  assert_eq!(graph.successor("zzz"), None);
  assert_eq!(graph.stage_names(), vec!["a", "b"]);
}

#[tokio::test]
async fn cycle_hits_max_steps() {
  let mut graph = StageGraph::new().with_max_steps(5);
  graph.add_node("a", tagging_stage("a")).unwrap();
  graph.add_node("b", tagging_stage("b")).unwrap();
  graph.add_edge("a", "b").unwrap();
  graph.add_edge("b", "a").unwrap();
  graph.set_start("a");
  let err = graph.invoke(PipelineState::new(vec![])).await.unwrap_err();
  assert_eq!(err, GraphError::MaxStepsExceeded(5));
}

#[tokio::test]
async fn invoke_logged_records_each_stage() {
  let graph = chain(&["a", "b"]);
  let mut log = StageLog::start();
  graph
    .invoke_logged(PipelineState::new(vec![]), &mut log)
    .await
    .unwrap();
  assert_eq!(log.completed_stages, vec!["a", "b"]);
  assert_eq!(log.steps[0].step, 1);
  assert_eq!(log.steps[0].next_stage.as_deref(), Some("b"));
  assert_eq!(log.steps[1].next_stage, None);
  assert_eq!(log.steps[1].errors_after, 2);
  assert!(log.finished_at.is_some());
}
