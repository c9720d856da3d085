//! Configuration for the chat-completion client.
//!
//! Values come from defaults, then CLI flags, then `EVOLWEAVE_*` environment
//! variables (environment wins, same as the flags-then-env precedence of the CLI).

use thiserror::Error;
use tracing::instrument;

pub const ENV_API_BASE: &str = "EVOLWEAVE_API_BASE";
pub const ENV_API_KEY: &str = "EVOLWEAVE_API_KEY";
pub const ENV_MODEL: &str = "EVOLWEAVE_MODEL";
pub const ENV_TEMPERATURE: &str = "EVOLWEAVE_TEMPERATURE";
pub const ENV_MAX_TOKENS: &str = "EVOLWEAVE_MAX_TOKENS";
pub const ENV_TIMEOUT_SECS: &str = "EVOLWEAVE_TIMEOUT_SECS";

pub const DEFAULT_API_BASE: &str = "http://localhost:11434/v1";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
  #[error("invalid value for {key}: {value:?}")]
  InvalidValue { key: &'static str, value: String },
}

/// Settings for [crate::ChatCompletionClient].
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
  /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
  pub api_base: String,
  pub api_key: Option<String>,
  pub model: String,
  pub temperature: f32,
  pub max_tokens: Option<u32>,
  pub timeout_secs: u64,
}

impl Default for CompletionConfig {
  fn default() -> Self {
    Self {
      api_base: DEFAULT_API_BASE.to_string(),
      api_key: None,
      model: DEFAULT_MODEL.to_string(),
      temperature: DEFAULT_TEMPERATURE,
      max_tokens: None,
      timeout_secs: DEFAULT_TIMEOUT_SECS,
    }
  }
}

impl CompletionConfig {
  /// Defaults overridden by the process environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::default().with_overrides(|key| std::env::var(key).ok())
  }

  /// Applies overrides from `lookup` (keyed by the `ENV_*` names) on top of `self`.
  /// Empty values are ignored.
  #[instrument(level = "trace", skip(self, lookup))]
  pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(ENV_API_BASE) {
      self.api_base = v;
    }
    if let Some(v) = get(ENV_API_KEY) {
      self.api_key = Some(v);
    }
    if let Some(v) = get(ENV_MODEL) {
      self.model = v;
    }
    if let Some(v) = get(ENV_TEMPERATURE) {
      self.temperature = parse(ENV_TEMPERATURE, &v)?;
    }
    if let Some(v) = get(ENV_MAX_TOKENS) {
      self.max_tokens = Some(parse(ENV_MAX_TOKENS, &v)?);
    }
    if let Some(v) = get(ENV_TIMEOUT_SECS) {
      self.timeout_secs = parse(ENV_TIMEOUT_SECS, &v)?;
    }
    Ok(self)
  }

  /// Full URL of the chat completions endpoint.
  pub fn chat_completions_url(&self) -> String {
    format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
  }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
  value.trim().parse().map_err(|_| ConfigError::InvalidValue {
    key,
    value: value.to_string(),
  })
}
