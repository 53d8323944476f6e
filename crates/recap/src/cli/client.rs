//! HTTP client for the recap REST API

use anyhow::{anyhow, Context, Result};
use clap::Args;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::timeout;

use crate::server::models::task::TaskBatch;
use crate::server::types::{
  ErrorResponse, SearchRequest, SearchResponse, StatusResponse, WeeklySummaryResponse,
};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the recap HTTP client
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
  /// Base URL of the recap server
  #[arg(long = "server", env = "RECAP_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
  pub base_url: String,

  /// Request timeout in seconds
  #[arg(
    long = "timeout",
    env = "RECAP_TIMEOUT_SECS",
    default_value_t = DEFAULT_CLIENT_TIMEOUT_SECS
  )]
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_SERVER_URL.to_string(), timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECS }
  }
}

/// HTTP client for the recap REST API
pub struct RecapClient {
  client: Client,
  config: ClientConfig,
}

impl RecapClient {
  pub fn with_config(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Ask the server to summarize a batch of tasks
  pub async fn weekly_summary(&self, batch: &TaskBatch) -> Result<WeeklySummaryResponse> {
    let response = timeout(
      Duration::from_secs(self.config.timeout_secs),
      self.client.post(self.url("/weekly-summary")).json(batch).send(),
    )
    .await??;

    parse_response(response, "Failed to generate summary").await
  }

  /// Search stored summaries
  pub async fn search(&self, query: &str, k: Option<usize>) -> Result<SearchResponse> {
    let request = SearchRequest { query: query.to_string(), k };
    let response = timeout(
      Duration::from_secs(self.config.timeout_secs),
      self.client.post(self.url("/search-summary")).json(&request).send(),
    )
    .await??;

    parse_response(response, "Failed to search summaries").await
  }

  /// Fetch server status
  pub async fn status(&self) -> Result<StatusResponse> {
    let response = timeout(
      Duration::from_secs(self.config.timeout_secs),
      self.client.get(self.url("/status")).send(),
    )
    .await??;

    parse_response(response, "Failed to get status").await
  }
}

async fn parse_response<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
  let status = response.status();
  if status.is_success() {
    return Ok(response.json().await?);
  }

  let body = response.text().await?;
  let detail = match serde_json::from_str::<ErrorResponse>(&body) {
    Ok(error) => error
      .errors
      .iter()
      .map(|e| format!("{}: {}", e.key, e.message))
      .collect::<Vec<_>>()
      .join("; "),
    Err(_) => body,
  };

  Err(anyhow!("{action} ({status}): {detail}"))
}
