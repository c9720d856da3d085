//! Tests for `EvolvedQuestion`.

use super::{EvolutionKind, EvolvedQuestion, QuestionMetadata};

#[test]
fn new_assigns_unique_ids_and_kind_score() {
  let a = EvolvedQuestion::new(
    "Why?",
    EvolutionKind::Reasoning,
    vec!["doc_0".to_string()],
    QuestionMetadata::evolved_from("What?"),
  );
  let b = EvolvedQuestion::new(
    "Why?",
    EvolutionKind::Reasoning,
    vec!["doc_0".to_string()],
    QuestionMetadata::evolved_from("What?"),
  );
  assert_ne!(a.id, b.id);
  assert_eq!(a.complexity_score, 8.0);
  assert_eq!(a.metadata.original_question.as_deref(), Some("What?"));
}

#[test]
fn serializes_camel_case_and_skips_unset_flags() {
  let q = EvolvedQuestion::new(
    "How does X relate to Y?",
    EvolutionKind::MultiContext,
    vec!["doc_0".to_string(), "doc_1".to_string()],
    QuestionMetadata {
      requires_multiple_contexts: Some(true),
      ..QuestionMetadata::evolved_from("What is X?")
    },
  );
  let v = serde_json::to_value(&q).unwrap();
  assert_eq!(v["questionText"], "How does X relate to Y?");
  assert_eq!(v["evolutionKind"], "multi_context");
  assert_eq!(v["complexityScore"], 7.0);
  assert_eq!(v["sourceDocumentIds"], serde_json::json!(["doc_0", "doc_1"]));
  assert_eq!(v["metadata"]["requiresMultipleContexts"], true);
  assert!(v["metadata"].get("requiresReasoning").is_none());
  assert!(v["metadata"]["evolutionTimestamp"].is_string());
}
