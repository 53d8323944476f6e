//! HTTP mapping for domain errors

use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::RecapError;
use crate::server::types::{ApiError, ErrorResponse};

impl RecapError {
  pub fn status_code(&self) -> StatusCode {
    match self {
      RecapError::ExternalService { .. } => StatusCode::BAD_GATEWAY,
      RecapError::EmptyBatch | RecapError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
      RecapError::Index(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
  }
}

impl From<JsonRejection> for RecapError {
  fn from(rejection: JsonRejection) -> Self {
    RecapError::validation(rejection.body_text())
  }
}

impl IntoResponse for RecapError {
  fn into_response(self) -> Response {
    let transaction_id = Uuid::new_v4();
    if self.is_client_error() {
      warn!(%transaction_id, key = self.key(), "{self}");
    } else {
      error!(%transaction_id, key = self.key(), "{self}");
    }

    let error = ApiError::new(self.key(), &self.to_string());
    (self.status_code(), Json(ErrorResponse::new(vec![error], transaction_id))).into_response()
  }
}
