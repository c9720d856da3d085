//! Test doubles shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::completion::{CompletionError, TextCompletion};
use crate::prompts;
use crate::types::ProcessedDocument;

type Responder = Box<dyn Fn(&str) -> Result<String, CompletionError> + Send + Sync>;

/// [TextCompletion] answering from a closure and recording every prompt.
pub(crate) struct ScriptedCompletion {
  responder: Responder,
  prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
  pub(crate) fn new(
    responder: impl Fn(&str) -> Result<String, CompletionError> + Send + Sync + 'static,
  ) -> Self {
    Self {
      responder: Box::new(responder),
      prompts: Mutex::new(Vec::new()),
    }
  }

  /// Always answers `text`.
  pub(crate) fn always(text: &'static str) -> Self {
    Self::new(move |_| Ok(text.to_string()))
  }

  /// Every call fails with a request error carrying `message`.
  pub(crate) fn failing(message: &'static str) -> Self {
    Self::new(move |_| Err(CompletionError::Request(message.to_string())))
  }

  /// Answers each prompt according to which template produced it.
  pub(crate) fn by_template() -> Self {
    Self::new(|prompt| {
      let text = if prompt.ends_with("Questions:") {
        "What is covered?\nWhy does it matter?\nHow is it used?\nNot a question"
      } else if prompt.contains("Context 2:") {
        "How do both documents relate?"
      } else if prompt.contains("multi-step logical reasoning") {
        "What can be inferred from this?"
      } else if prompt.ends_with("Rewritten question:") {
        "What deeper aspect is covered?"
      } else {
        "An answer grounded in the context."
      };
      Ok(text.to_string())
    })
  }

  pub(crate) fn prompts(&self) -> Vec<String> {
    self.prompts.lock().unwrap().clone()
  }

  pub(crate) fn calls(&self) -> usize {
    self.prompts.lock().unwrap().len()
  }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
  async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
    self.prompts.lock().unwrap().push(prompt.to_string());
    (self.responder)(prompt)
  }
}

/// Body long enough to clear every length heuristic.
pub(crate) fn long_text(topic: &str) -> String {
  format!(
    "{topic} is discussed at length in this document, covering its history and uses.\n\n\
     The second paragraph about {topic} explains mechanisms in considerable detail here.\n\n\
     A third paragraph on {topic} closes with practical consequences and open problems."
  )
}

/// A processed document `doc_{index}` with the given content and seed questions.
pub(crate) fn processed(index: usize, content: &str, seeds: &[&str]) -> ProcessedDocument {
  ProcessedDocument {
    id: ProcessedDocument::id_for(index),
    content: content.to_string(),
    metadata: HashMap::new(),
    seed_questions: seeds.iter().map(|s| s.to_string()).collect(),
  }
}

#[test]
fn by_template_routes_prompts() {
  let llm = ScriptedCompletion::by_template();
  let r = (llm.responder)(&prompts::seed_questions("x")).unwrap();
  assert!(r.starts_with("What is covered?"));
  let r = (llm.responder)(&prompts::multi_context_evolution("q", "a", "b")).unwrap();
  assert_eq!(r, "How do both documents relate?");
  let r = (llm.responder)(&prompts::reasoning_evolution("q", "a")).unwrap();
  assert_eq!(r, "What can be inferred from this?");
  let r = (llm.responder)(&prompts::simple_evolution("q", "a")).unwrap();
  assert_eq!(r, "What deeper aspect is covered?");
  let r = (llm.responder)(&prompts::answer("q", "a")).unwrap();
  assert_eq!(r, "An answer grounded in the context.");
}
