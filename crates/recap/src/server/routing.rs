//! Axum router configuration for all endpoints

use anyhow::{Context, Result};
use axum::{
  http::HeaderValue,
  middleware,
  routing::{get, post},
  Router,
};
use tower::ServiceBuilder;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::server::handlers::{status, summaries};
use crate::server::middleware::request_context_middleware;
use crate::server::state::AppState;

/// CORS restricted to a single origin; any method and header is allowed from it
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
  let origin = HeaderValue::from_str(allowed_origin)
    .with_context(|| format!("Invalid allowed origin '{allowed_origin}'"))?;

  Ok(CorsLayer::new().allow_origin(origin).allow_methods(Any).allow_headers(Any))
}

/// Create the main application router
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
  Router::new()
    .route("/", get(status::root))
    .route("/status", get(status::status))
    .route("/schema", get(status::schema))
    .route("/weekly-summary", post(summaries::weekly_summary))
    .route("/search-summary", post(summaries::search_summary))
    .layer(middleware::from_fn(request_context_middleware))
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
    .with_state(state)
}
