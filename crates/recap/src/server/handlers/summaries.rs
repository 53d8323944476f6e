//! Weekly summary generation and search handlers

use axum::{
  extract::{rejection::JsonRejection, State},
  response::Json,
  Extension,
};
use tracing::info;

use crate::error::Result;
use crate::server::middleware::RequestContext;
use crate::server::models::task::TaskBatch;
use crate::server::models::week::derive_label;
use crate::server::services::summary_store::DEFAULT_SEARCH_LIMIT;
use crate::server::state::AppState;
use crate::server::types::{
  SearchRequest, SearchResponse, SearchResultData, WeeklySummaryResponse,
};

/// POST /weekly-summary - Generate, store and return a summary for a batch of tasks
///
/// The label is resolved before the provider is called, so an empty batch
/// never costs an upstream request.
pub async fn weekly_summary(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: std::result::Result<Json<TaskBatch>, JsonRejection>,
) -> Result<Json<WeeklySummaryResponse>> {
  let Json(batch) = payload?;

  let label = derive_label(&batch)?;
  let summary = state.generator.generate(&batch).await?;
  state.store.store(&summary, &label).await?;

  info!(
    request_id = %context.request_id,
    tasks = batch.tasks.len(),
    label = %label,
    "weekly summary generated"
  );

  Ok(Json(WeeklySummaryResponse { summary, label }))
}

/// POST /search-summary - Find stored summaries similar to a free-text query
pub async fn search_summary(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
  let Json(request) = payload?;
  let limit = request.k.unwrap_or(DEFAULT_SEARCH_LIMIT);

  let matches = state.store.search(&request.query, limit).await?;

  info!(request_id = %context.request_id, results = matches.len(), "summary search completed");

  Ok(Json(SearchResponse { results: matches.into_iter().map(SearchResultData::from).collect() }))
}
