//! Prompt templates for every TextCompletion call the stages make.

/// Asks for three comprehension questions about `content`.
pub fn seed_questions(content: &str) -> String {
  format!(
    "Based on the following document, write 3 comprehension questions that can be \
     answered from its content. Return only the questions, one per line, each ending \
     with a question mark.\n\nDocument:\n{content}\n\nQuestions:"
  )
}

/// Asks to deepen a seed question using one document's context.
pub fn simple_evolution(question: &str, context: &str) -> String {
  format!(
    "Rewrite the question below into a more complex version that requires a deeper \
     understanding of the context. It must stay answerable from the context. Return \
     only the rewritten question.\n\nContext:\n{context}\n\nOriginal question: \
     {question}\n\nRewritten question:"
  )
}

/// Asks to turn a question into one that needs both documents to answer.
pub fn multi_context_evolution(question: &str, first: &str, second: &str) -> String {
  format!(
    "Rewrite the question below so that answering it requires combining information \
     from both contexts. Return only the rewritten question.\n\nContext 1:\n{first}\n\n\
     Context 2:\n{second}\n\nOriginal question: {question}\n\nRewritten question:"
  )
}

/// Asks for a variant that needs multi-step reasoning over the context.
pub fn reasoning_evolution(question: &str, context: &str) -> String {
  format!(
    "Rewrite the question below so that answering it requires multi-step logical \
     reasoning (inference, cause and effect, or comparison) over the context. Return \
     only the rewritten question.\n\nContext:\n{context}\n\nOriginal question: \
     {question}\n\nRewritten question:"
  )
}

/// Asks for an answer grounded only in `context`.
pub fn answer(question: &str, context: &str) -> String {
  format!(
    "Answer the question below comprehensively, using only information from the \
     context. If the context does not contain the answer, say so.\n\nContext:\n\
     {context}\n\nQuestion: {question}\n\nAnswer:"
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prompts_embed_inputs() {
    assert!(seed_questions("DOC BODY").contains("DOC BODY"));
    let p = simple_evolution("What is X?", "CTX");
    assert!(p.contains("What is X?") && p.contains("CTX"));
    let p = multi_context_evolution("Q?", "FIRST", "SECOND");
    assert!(p.contains("FIRST") && p.contains("SECOND") && p.contains("Q?"));
    assert!(reasoning_evolution("Q?", "CTX").contains("reasoning"));
    assert!(answer("Q?", "CTX").contains("only information from the context"));
  }
}
