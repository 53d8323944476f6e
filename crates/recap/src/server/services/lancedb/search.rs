//! Vector search operations and result processing for LanceDB

use anyhow::{anyhow, Result};
use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use futures::stream::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{DistanceType, Table};

use super::records::{distance_column, string_column, ID_COLUMN, LABEL_COLUMN, SUMMARY_COLUMN};
use crate::server::services::vector_index::IndexHit;

/// Run a k-nearest-neighbour query using cosine distance.
///
/// Similarity derived from these distances only matches an L2-distance store on exact hits.
///
/// Hits come back in the engine's order (ascending distance); they are not
/// re-sorted here.
pub async fn search_nearest(
  table: &Table,
  query_embedding: &[f32],
  limit: usize,
) -> Result<Vec<IndexHit>> {
  let batches: Vec<RecordBatch> = table
    .vector_search(query_embedding)
    .map_err(|e| anyhow!("Invalid query vector: {}", e))?
    .column("embedding")
    .distance_type(DistanceType::Cosine)
    .limit(limit)
    .execute()
    .await
    .map_err(|e| anyhow!("Vector search failed: {}", e))?
    .try_collect()
    .await
    .map_err(|e| anyhow!("Error reading search results: {}", e))?;

  let mut hits = Vec::new();
  for batch in &batches {
    hits.extend(process_result_batch(batch)?);
  }
  Ok(hits)
}

/// Convert a single result batch into hits
pub fn process_result_batch(batch: &RecordBatch) -> Result<Vec<IndexHit>> {
  let ids = string_column(batch, ID_COLUMN)?;
  let summaries = string_column(batch, SUMMARY_COLUMN)?;
  let labels = string_column(batch, LABEL_COLUMN).ok();
  let distances = distance_column(batch).ok_or_else(|| anyhow!("Missing '_distance' column"))?;

  let hits = (0..batch.num_rows())
    .map(|row| IndexHit {
      id: ids.value(row).to_string(),
      text: summaries.value(row).to_string(),
      label: labels.filter(|array| !array.is_null(row)).map(|array| array.value(row).to_string()),
      distance: distances.value(row),
    })
    .collect();

  Ok(hits)
}
