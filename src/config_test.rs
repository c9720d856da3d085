//! Tests for `config`.

use std::collections::HashMap;

use crate::config::{
  CompletionConfig, ConfigError, DEFAULT_API_BASE, DEFAULT_MODEL, ENV_API_BASE, ENV_API_KEY,
  ENV_MAX_TOKENS, ENV_MODEL, ENV_TEMPERATURE, ENV_TIMEOUT_SECS,
};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
  let map: HashMap<String, String> = pairs
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
  move |k: &str| map.get(k).cloned()
}

#[test]
fn defaults_without_overrides() {
  let cfg = CompletionConfig::default().with_overrides(lookup(&[])).unwrap();
  assert_eq!(cfg.api_base, DEFAULT_API_BASE);
  assert_eq!(cfg.model, DEFAULT_MODEL);
  assert!(cfg.api_key.is_none());
  assert!(cfg.max_tokens.is_none());
}

#[test]
fn overrides_apply() {
  let cfg = CompletionConfig::default()
    .with_overrides(lookup(&[
      (ENV_API_BASE, "https://api.example.com/v1/"),
      (ENV_API_KEY, "sk-test"),
      (ENV_MODEL, "gpt-4o-mini"),
      (ENV_TEMPERATURE, "0.2"),
      (ENV_MAX_TOKENS, "512"),
      (ENV_TIMEOUT_SECS, "15"),
    ]))
    .unwrap();
  assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
  assert_eq!(cfg.model, "gpt-4o-mini");
  assert_eq!(cfg.temperature, 0.2);
  assert_eq!(cfg.max_tokens, Some(512));
  assert_eq!(cfg.timeout_secs, 15);
  assert_eq!(
    cfg.chat_completions_url(),
    "https://api.example.com/v1/chat/completions"
  );
}

#[test]
fn empty_values_are_ignored() {
  let cfg = CompletionConfig::default()
    .with_overrides(lookup(&[(ENV_MODEL, "  "), (ENV_TIMEOUT_SECS, "")]))
    .unwrap();
  assert_eq!(cfg.model, DEFAULT_MODEL);
}

#[test]
fn invalid_number_is_an_error() {
  let err = CompletionConfig::default()
    .with_overrides(lookup(&[(ENV_TIMEOUT_SECS, "soon")]))
    .unwrap_err();
  assert_eq!(
    err,
    ConfigError::InvalidValue {
      key: ENV_TIMEOUT_SECS,
      value: "soon".to_string()
    }
  );
  assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
}
