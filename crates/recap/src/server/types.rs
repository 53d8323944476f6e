//! REST API types with schemars annotations for schema generation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::server::models::summary::SummaryMatch;

// Status Endpoints
// ================

/// Response for the `/` liveness endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RootResponse {
  pub message: String,
}

/// Response for `/status`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
  /// Always "healthy" when the index answered
  pub status: String,

  /// Server version
  pub version: String,

  /// Directory holding the vector index
  pub data_dir: String,

  /// Number of stored summaries
  pub summaries: usize,
}

// Summary Endpoints
// =================

/// Response for `/weekly-summary`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WeeklySummaryResponse {
  /// Generated summary text
  pub summary: String,

  /// Week label the summary was stored under
  pub label: String,
}

/// Request for `/search-summary`
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchRequest {
  /// Free-text query; missing or empty yields no results
  #[serde(default)]
  pub query: String,

  /// Maximum number of matches, defaults to 3
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub k: Option<usize>,
}

/// One ranked match
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchResultData {
  /// Stored summary text
  pub summary: String,

  /// `1 - distance`, rounded to three decimals
  pub similarity: f64,

  /// Week label, or "Unknown week"
  pub label: String,
}

impl From<SummaryMatch> for SearchResultData {
  fn from(found: SummaryMatch) -> Self {
    Self { summary: found.text, similarity: found.similarity, label: found.label }
  }
}

/// Response for `/search-summary`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchResponse {
  /// Nearest summaries first
  pub results: Vec<SearchResultData>,
}

// Errors
// ======

/// API error information
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
  /// Error key: upstream_unavailable, empty_batch, invalid_input or storage_unavailable
  pub key: String,

  /// Human readable error message
  pub message: String,
}

impl ApiError {
  pub fn new(key: &str, message: &str) -> Self {
    Self { key: key.to_string(), message: message.to_string() }
  }
}

/// Body returned with every non-2xx response
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
  /// Transaction ID for logging correlation
  pub transaction_id: Uuid,

  pub errors: Vec<ApiError>,
}

impl ErrorResponse {
  pub fn new(errors: Vec<ApiError>, transaction_id: Uuid) -> Self {
    Self { transaction_id, errors }
  }
}
