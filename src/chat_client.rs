//! [TextCompletion] over an OpenAI-compatible `/chat/completions` endpoint.
//!
//! Works with OpenAI itself, vLLM, llama.cpp server and Ollama's `/v1` API.
//! The prompt is sent as a single user message; one request per call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::completion::{CompletionError, TextCompletion};
use crate::config::CompletionConfig;

/// HTTP client for an OpenAI-compatible chat completions API.
pub struct ChatCompletionClient {
  client: Client,
  url: String,
  config: CompletionConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
  pub model: &'a str,
  pub messages: Vec<ChatMessage<'a>>,
  pub temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_tokens: Option<u32>,
  pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
  pub role: &'static str,
  pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
  #[serde(default)]
  pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
  pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoiceMessage {
  #[serde(default)]
  pub content: Option<String>,
}

impl ChatCompletionClient {
  pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| CompletionError::Config(e.to_string()))?;
    Ok(Self {
      client,
      url: config.chat_completions_url(),
      config,
    })
  }

  pub fn model(&self) -> &str {
    &self.config.model
  }

  pub(crate) fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
    ChatRequest {
      model: &self.config.model,
      messages: vec![ChatMessage {
        role: "user",
        content: prompt,
      }],
      temperature: self.config.temperature,
      max_tokens: self.config.max_tokens,
      stream: false,
    }
  }
}

/// Pulls the first choice's content out of a decoded response.
pub(crate) fn first_choice_content(response: ChatResponse) -> Result<String, CompletionError> {
  response
    .choices
    .into_iter()
    .next()
    .and_then(|c| c.message.content)
    .filter(|c| !c.trim().is_empty())
    .ok_or(CompletionError::EmptyResponse)
}

fn map_send_error(e: reqwest::Error) -> CompletionError {
  if e.is_timeout() {
    CompletionError::Timeout
  } else {
    CompletionError::Request(e.to_string())
  }
}

#[async_trait]
impl TextCompletion for ChatCompletionClient {
  #[instrument(level = "trace", skip(self, prompt), fields(model = %self.config.model))]
  async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
    debug!(prompt_chars = prompt.len(), url = %self.url, "sending chat completion");

    let mut request = self.client.post(&self.url).json(&self.request_body(prompt));
    if let Some(key) = &self.config.api_key {
      request = request.bearer_auth(key);
    }
    let response = request.send().await.map_err(map_send_error)?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(CompletionError::Status {
        status: status.as_u16(),
        body,
      });
    }

    let decoded: ChatResponse = response
      .json()
      .await
      .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;
    first_choice_content(decoded)
  }
}
