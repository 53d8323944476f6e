//! Arrow RecordBatch conversion for summary records

use anyhow::{anyhow, Result};
use arrow::array::{Array, FixedSizeListBuilder, Float32Array, Float32Builder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::server::services::vector_index::IndexRecord;

pub const ID_COLUMN: &str = "id";
pub const SUMMARY_COLUMN: &str = "summary";
pub const LABEL_COLUMN: &str = "label";
pub const CREATED_AT_COLUMN: &str = "created_at";
pub const EMBEDDING_COLUMN: &str = "embedding";

/// Arrow schema for the summaries table
pub fn summary_schema(embedding_dimension: usize) -> Arc<Schema> {
  Arc::new(Schema::new(vec![
    Field::new(ID_COLUMN, DataType::Utf8, false),
    Field::new(SUMMARY_COLUMN, DataType::Utf8, false),
    Field::new(LABEL_COLUMN, DataType::Utf8, true),
    Field::new(CREATED_AT_COLUMN, DataType::Utf8, false),
    Field::new(
      EMBEDDING_COLUMN,
      DataType::FixedSizeList(
        Arc::new(Field::new("item", DataType::Float32, true)),
        embedding_dimension as i32,
      ),
      false,
    ),
  ]))
}

/// Convert index records into a single Arrow RecordBatch
pub fn records_to_arrow_batch(
  records: &[IndexRecord],
  embedding_dimension: usize,
) -> Result<RecordBatch> {
  if records.is_empty() {
    return Err(anyhow!("Cannot create RecordBatch from empty records"));
  }
  validate_embedding_dimensions(records, embedding_dimension)?;

  let ids = StringArray::from_iter_values(records.iter().map(|r| r.id.as_str()));
  let summaries = StringArray::from_iter_values(records.iter().map(|r| r.text.as_str()));
  let labels: StringArray = records.iter().map(|r| r.label.as_deref()).collect();
  let created_at: Vec<String> = records.iter().map(|r| r.created_at.to_rfc3339()).collect();
  let created_at = StringArray::from_iter_values(created_at.iter().map(String::as_str));
  let embeddings = build_embedding_array(records, embedding_dimension);

  let columns: Vec<Arc<dyn Array>> = vec![
    Arc::new(ids),
    Arc::new(summaries),
    Arc::new(labels),
    Arc::new(created_at),
    Arc::new(embeddings),
  ];

  RecordBatch::try_new(summary_schema(embedding_dimension), columns)
    .map_err(|e| anyhow!("Failed to create RecordBatch: {}", e))
}

fn validate_embedding_dimensions(
  records: &[IndexRecord],
  embedding_dimension: usize,
) -> Result<()> {
  match records.iter().find(|r| r.embedding.len() != embedding_dimension) {
    Some(record) => Err(anyhow!(
      "Embedding for {} has {} dimensions, index expects {}",
      record.id,
      record.embedding.len(),
      embedding_dimension
    )),
    None => Ok(()),
  }
}

fn build_embedding_array(
  records: &[IndexRecord],
  embedding_dimension: usize,
) -> arrow::array::FixedSizeListArray {
  let mut builder = FixedSizeListBuilder::new(
    Float32Builder::with_capacity(embedding_dimension * records.len()),
    embedding_dimension as i32,
  );

  for record in records {
    builder.values().append_slice(&record.embedding);
    builder.append(true);
  }

  builder.finish()
}

/// Read back the distance column LanceDB attaches to vector search results
pub fn distance_column(batch: &RecordBatch) -> Option<&Float32Array> {
  batch.column_by_name("_distance").and_then(|col| col.as_any().downcast_ref::<Float32Array>())
}

/// Extract a string column from a batch
pub fn string_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a StringArray> {
  batch
    .column_by_name(column_name)
    .ok_or_else(|| anyhow!("Missing '{}' column", column_name))?
    .as_any()
    .downcast_ref::<StringArray>()
    .ok_or_else(|| anyhow!("Failed to cast '{}' column to StringArray", column_name))
}
