//! The text-completion capability every LLM-backed stage calls.

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a [TextCompletion] implementation.
#[derive(Error, Debug)]
pub enum CompletionError {
  /// Transport failure (connection refused, DNS, TLS, ...).
  #[error("request failed: {0}")]
  Request(String),

  /// Provider answered with a non-success status.
  #[error("provider returned status {status}: {body}")]
  Status { status: u16, body: String },

  /// Provider body could not be decoded.
  #[error("invalid response: {0}")]
  InvalidResponse(String),

  #[error("empty response from provider")]
  EmptyResponse,

  #[error("request timed out")]
  Timeout,

  #[error("configuration error: {0}")]
  Config(String),
}

/// A single-attempt `prompt -> text` capability.
///
/// Retries and timeouts beyond one request belong to the implementation; the
/// pipeline treats every call as one attempt and records failures as data.
#[async_trait]
pub trait TextCompletion: Send + Sync {
  async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
