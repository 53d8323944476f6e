//! Liveness, status and schema endpoint handlers

use axum::{extract::State, response::Json};
use schemars::schema_for;
use serde_json::{json, Value};

use crate::error::Result;
use crate::server::models::task::TaskBatch;
use crate::server::state::AppState;
use crate::server::types::{RootResponse, SearchRequest, StatusResponse};

/// GET / - Liveness check
pub async fn root() -> Json<RootResponse> {
  Json(RootResponse { message: "Backend is running".to_string() })
}

/// GET /status - Health check including the number of stored summaries
pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>> {
  let summaries = state.store.count().await?;

  Ok(Json(StatusResponse {
    status: "healthy".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    data_dir: state.data_dir.to_string_lossy().to_string(),
    summaries,
  }))
}

/// GET /schema - JSON Schemas of the request bodies
pub async fn schema() -> Json<Value> {
  Json(json!({
    "weekly_summary": schema_for!(TaskBatch),
    "search_summary": schema_for!(SearchRequest),
  }))
}
