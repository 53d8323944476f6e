//! Error taxonomy shared by the summary store, the generator and the REST layer

use thiserror::Error;

/// Result alias for domain operations
pub type Result<T> = std::result::Result<T, RecapError>;

/// Failures surfaced to callers of the recap service.
///
/// Every variant maps onto a distinct HTTP status so clients can tell an
/// unavailable AI provider apart from bad input or unavailable storage.
#[derive(Debug, Error)]
pub enum RecapError {
  /// The text-generation provider failed (network, timeout, non-2xx status, malformed body)
  #[error("summary provider unavailable: {detail}")]
  ExternalService { status: Option<u16>, detail: String },

  /// Label derivation had neither an explicit label nor a task to take a date from
  #[error("cannot derive a week label from an empty task batch")]
  EmptyBatch,

  /// Malformed client input
  #[error("invalid input: {0}")]
  Validation(String),

  /// Embedding or vector index failure
  #[error("summary storage unavailable: {0}")]
  Index(String),
}

impl RecapError {
  pub fn external(status: Option<u16>, detail: impl Into<String>) -> Self {
    Self::ExternalService { status, detail: detail.into() }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  /// Wrap an infrastructure failure from the embedder or the index
  pub fn index(error: anyhow::Error) -> Self {
    Self::Index(format!("{error:#}"))
  }

  /// Stable machine-readable key used in API error bodies
  pub fn key(&self) -> &'static str {
    match self {
      Self::ExternalService { .. } => "upstream_unavailable",
      Self::EmptyBatch => "empty_batch",
      Self::Validation(_) => "invalid_input",
      Self::Index(_) => "storage_unavailable",
    }
  }

  /// Whether the caller, rather than this service or its dependencies, is at fault
  pub fn is_client_error(&self) -> bool {
    matches!(self, Self::EmptyBatch | Self::Validation(_))
  }
}
