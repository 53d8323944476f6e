//! Weekly summary generation through the Anthropic Messages API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{RecapError, Result};
use crate::server::models::task::TaskBatch;

pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const API_VERSION: &str = "2023-06-01";

/// Produces a natural-language summary for a batch of tasks
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
  async fn generate(&self, batch: &TaskBatch) -> Result<String>;
}

/// Render the coaching prompt for a batch
pub fn render_prompt(batch: &TaskBatch) -> String {
  let items = batch
    .tasks
    .iter()
    .map(|t| format!("- {} ({} min, focus {})", t.name, t.time_spent, t.focus))
    .collect::<Vec<_>>()
    .join("\n");

  format!(
    "You are a productivity coach.\n\
     Tasks for the week:\n{items}\n\n\
     Write ONE paragraph summarizing overall productivity and give 2–3 actionable tips for next week."
  )
}

/// Settings for the Anthropic client
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
  pub api_base: String,
  pub model: String,
  pub max_tokens: u32,
  pub timeout_secs: u64,
  /// Environment variable the API key is read from on every call
  pub api_key_var: String,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      api_base: DEFAULT_API_BASE.to_string(),
      model: DEFAULT_MODEL.to_string(),
      max_tokens: DEFAULT_MAX_TOKENS,
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      api_key_var: DEFAULT_API_KEY_VAR.to_string(),
    }
  }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
  model: &'a str,
  max_tokens: u32,
  messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
  role: &'a str,
  content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
  #[serde(default)]
  content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
  #[serde(rename = "type")]
  kind: String,
  #[serde(default)]
  text: Option<String>,
}

/// Summary generator calling Claude.
///
/// The API key is looked up when a request is made rather than at
/// construction; a missing key is left for the provider to reject.
pub struct AnthropicGenerator {
  client: Client,
  config: GeneratorConfig,
}

impl AnthropicGenerator {
  pub fn new(config: GeneratorConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| RecapError::external(None, format!("Failed to create HTTP client: {e}")))?;

    Ok(Self { client, config })
  }

  fn messages_url(&self) -> String {
    format!("{}/v1/messages", self.config.api_base.trim_end_matches('/'))
  }

  fn api_key(&self) -> String {
    std::env::var(&self.config.api_key_var).unwrap_or_default()
  }

  fn map_transport_error(&self, error: reqwest::Error) -> RecapError {
    if error.is_timeout() {
      RecapError::external(None, format!("request timed out after {}s", self.config.timeout_secs))
    } else {
      RecapError::external(error.status().map(|s| s.as_u16()), error.to_string())
    }
  }
}

#[async_trait]
impl SummaryGenerator for AnthropicGenerator {
  async fn generate(&self, batch: &TaskBatch) -> Result<String> {
    let prompt = render_prompt(batch);
    let request = MessagesRequest {
      model: &self.config.model,
      max_tokens: self.config.max_tokens,
      messages: vec![RequestMessage { role: "user", content: &prompt }],
    };

    debug!(tasks = batch.tasks.len(), model = %self.config.model, "requesting weekly summary");

    let response = self
      .client
      .post(self.messages_url())
      .header("x-api-key", self.api_key())
      .header("anthropic-version", API_VERSION)
      .header("content-type", "application/json")
      .json(&request)
      .send()
      .await
      .map_err(|e| self.map_transport_error(e))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      warn!(status = status.as_u16(), "summary provider rejected request");
      return Err(RecapError::external(Some(status.as_u16()), body));
    }

    let parsed: MessagesResponse = response.json().await.map_err(|e| {
      RecapError::external(Some(status.as_u16()), format!("malformed response body: {e}"))
    })?;

    parsed
      .content
      .into_iter()
      .find(|block| block.kind == "text")
      .and_then(|block| block.text)
      .map(|text| text.trim().to_string())
      .filter(|text| !text.is_empty())
      .ok_or_else(|| {
        RecapError::external(Some(status.as_u16()), "response contained no text content")
      })
  }
}
