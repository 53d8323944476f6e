//! Vector index abstraction for summary storage and retrieval
//!
//! This module provides a generic interface for vector index operations,
//! allowing different engines (LanceDB, in-memory for tests, ...) to be
//! swapped without changing the summary store.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A record handed to the index for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRecord {
  /// Unique identifier for the summary
  pub id: String,
  /// Summary body, the text the embedding was computed from
  pub text: String,
  /// Week label metadata; older or hand-loaded records may lack one
  pub label: Option<String>,
  /// When the record was written
  pub created_at: DateTime<Utc>,
  /// Embedding of `text`
  pub embedding: Vec<f32>,
}

/// A nearest-neighbour hit returned by the index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
  pub id: String,
  pub text: String,
  pub label: Option<String>,
  /// Raw distance reported by the engine (smaller is closer)
  pub distance: f32,
}

/// Vector index interface for storing and searching summary embeddings.
///
/// Implementations must tolerate concurrent readers alongside a writer and
/// must serialize writers themselves if the engine requires it.
#[async_trait]
pub trait VectorIndex: Send + Sync {
  /// Append a record; it must be durable once this returns
  async fn insert(&self, record: IndexRecord) -> Result<()>;

  /// Return up to `limit` records ordered by ascending distance to `query_embedding`
  async fn nearest(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<IndexHit>>;

  /// Number of records currently stored
  async fn count(&self) -> Result<usize>;
}
