//! State threaded through every pipeline stage.

use tracing::instrument;

use super::{Document, EvolvedQuestion, ProcessedDocument, QuestionAnswer, QuestionContext};

/// State threaded through every pipeline stage.
///
/// Created fresh per run and only changed by merging a [StateUpdate] returned
/// from a stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
  pub documents: Vec<Document>,
  pub processed_documents: Vec<ProcessedDocument>,
  pub evolved_questions: Vec<EvolvedQuestion>,
  pub question_answers: Vec<QuestionAnswer>,
  pub question_contexts: Vec<QuestionContext>,
  pub errors: Vec<String>,
}

impl PipelineState {
  /// Seeds a state with the input documents and empty collections.
  pub fn new(documents: Vec<Document>) -> Self {
    Self {
      documents,
      ..Self::default()
    }
  }

  /// Shallow merge: every field present in `update` replaces the field in full.
  #[instrument(level = "trace", skip(self, update))]
  pub fn apply(&mut self, update: StateUpdate) {
    if let Some(v) = update.processed_documents {
      self.processed_documents = v;
    }
    if let Some(v) = update.evolved_questions {
      self.evolved_questions = v;
    }
    if let Some(v) = update.question_answers {
      self.question_answers = v;
    }
    if let Some(v) = update.question_contexts {
      self.question_contexts = v;
    }
    if let Some(v) = update.errors {
      self.errors = v;
    }
  }

  /// Looks up a processed document by id.
  pub fn processed_document(&self, id: &str) -> Option<&ProcessedDocument> {
    self.processed_documents.iter().find(|d| d.id == id)
  }
}

/// Partial result of one stage. `None` fields leave the state untouched.
///
/// Arrays are replaced, not appended: a stage that extends `evolved_questions`
/// or `errors` returns the prior entries plus its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
  pub processed_documents: Option<Vec<ProcessedDocument>>,
  pub evolved_questions: Option<Vec<EvolvedQuestion>>,
  pub question_answers: Option<Vec<QuestionAnswer>>,
  pub question_contexts: Option<Vec<QuestionContext>>,
  pub errors: Option<Vec<String>>,
}

impl StateUpdate {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn processed_documents(mut self, v: Vec<ProcessedDocument>) -> Self {
    self.processed_documents = Some(v);
    self
  }

  pub fn evolved_questions(mut self, v: Vec<EvolvedQuestion>) -> Self {
    self.evolved_questions = Some(v);
    self
  }

  pub fn question_answers(mut self, v: Vec<QuestionAnswer>) -> Self {
    self.question_answers = Some(v);
    self
  }

  pub fn question_contexts(mut self, v: Vec<QuestionContext>) -> Self {
    self.question_contexts = Some(v);
    self
  }

  pub fn errors(mut self, v: Vec<String>) -> Self {
    self.errors = Some(v);
    self
  }
}
