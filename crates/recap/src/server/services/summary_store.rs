//! Summary store: the write and read paths over the embedder and the vector index

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{RecapError, Result};
use crate::server::models::summary::{
  similarity_from_distance, SummaryMatch, SummaryRecord, UNKNOWN_WEEK,
};
use crate::server::services::embeddings::Embedder;
use crate::server::services::vector_index::{IndexRecord, VectorIndex};

/// Number of matches returned when the caller does not ask for a specific count
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

/// Persists generated summaries and answers similarity queries over them.
///
/// Constructed once at startup and shared behind an `Arc`; holds no state of
/// its own beyond the two service handles.
pub struct SummaryStore {
  embedder: Arc<dyn Embedder>,
  index: Arc<dyn VectorIndex>,
}

impl SummaryStore {
  pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>) -> Self {
    Self { embedder, index }
  }

  /// Embed and persist a summary under an already-resolved label.
  ///
  /// Embedding and persistence are two independent steps with no rollback
  /// between them; a failure in either surfaces as `RecapError::Index`.
  pub async fn store(&self, summary_text: &str, label: &str) -> Result<SummaryRecord> {
    if summary_text.is_empty() {
      return Err(RecapError::validation("summary text must not be empty"));
    }
    if label.is_empty() {
      return Err(RecapError::validation("summary label must not be empty"));
    }

    let record = SummaryRecord {
      id: Uuid::new_v4().to_string(),
      text: summary_text.to_string(),
      label: label.to_string(),
      created_at: Utc::now(),
    };

    let embedding = self.embedder.embed(summary_text).await.map_err(RecapError::index)?;

    self
      .index
      .insert(IndexRecord {
        id: record.id.clone(),
        text: record.text.clone(),
        label: Some(record.label.clone()),
        created_at: record.created_at,
        embedding,
      })
      .await
      .map_err(RecapError::index)?;

    info!(id = %record.id, label = %record.label, "stored weekly summary");
    Ok(record)
  }

  /// Find the `limit` stored summaries closest to `query_text`.
  ///
  /// An empty query short-circuits to no results without touching the
  /// embedder or the index.
  pub async fn search(&self, query_text: &str, limit: usize) -> Result<Vec<SummaryMatch>> {
    if query_text.is_empty() {
      return Ok(Vec::new());
    }

    let query_embedding = self.embedder.embed(query_text).await.map_err(RecapError::index)?;
    let hits = self.index.nearest(&query_embedding, limit).await.map_err(RecapError::index)?;

    debug!(hits = hits.len(), limit, "similarity search complete");

    Ok(
      hits
        .into_iter()
        .take(limit)
        .map(|hit| SummaryMatch {
          text: hit.text,
          similarity: similarity_from_distance(hit.distance),
          label: hit
            .label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| UNKNOWN_WEEK.to_string()),
        })
        .collect(),
    )
  }

  /// Number of summaries stored so far
  pub async fn count(&self) -> Result<usize> {
    self.index.count().await.map_err(RecapError::index)
  }
}
