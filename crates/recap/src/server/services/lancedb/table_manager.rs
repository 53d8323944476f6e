//! Table management operations for LanceDB

use anyhow::{anyhow, Result};
use arrow::record_batch::RecordBatchIterator;
use lancedb::{Connection, Table};
use tracing::info;

use super::records::records_to_arrow_batch;
use crate::server::services::vector_index::IndexRecord;

/// Table manager for LanceDB operations
pub struct TableManager {
  connection: Connection,
  table_name: String,
  embedding_dimension: usize,
}

impl TableManager {
  pub fn new(connection: Connection, table_name: String, embedding_dimension: usize) -> Self {
    Self { connection, table_name, embedding_dimension }
  }

  pub fn table_name(&self) -> &str {
    &self.table_name
  }

  /// Check if the target table exists
  pub async fn table_exists(&self) -> Result<bool> {
    let tables = self
      .connection
      .table_names()
      .execute()
      .await
      .map_err(|e| anyhow!("Failed to list tables: {}", e))?;
    Ok(tables.contains(&self.table_name))
  }

  /// Get the table instance
  pub async fn get_table(&self) -> Result<Table> {
    self
      .connection
      .open_table(&self.table_name)
      .execute()
      .await
      .map_err(|e| anyhow!("Failed to open table '{}': {}", self.table_name, e))
  }

  /// Create the table, seeding it with its first record
  pub async fn create_table_with_first_record(&self, record: &IndexRecord) -> Result<()> {
    let batch = records_to_arrow_batch(std::slice::from_ref(record), self.embedding_dimension)?;
    let schema = batch.schema();
    let batch_iter = RecordBatchIterator::new(vec![Ok(batch)], schema);

    self
      .connection
      .create_table(&self.table_name, batch_iter)
      .execute()
      .await
      .map_err(|e| anyhow!("Failed to create table with first record: {}", e))?;

    info!(table = %self.table_name, id = %record.id, "created summaries table");
    Ok(())
  }

  /// Append a record to the existing table
  pub async fn add_record_to_existing_table(&self, record: &IndexRecord) -> Result<()> {
    let batch = records_to_arrow_batch(std::slice::from_ref(record), self.embedding_dimension)?;
    let schema = batch.schema();
    let batch_iter = RecordBatchIterator::new(vec![Ok(batch)], schema);

    let table = self.get_table().await?;
    table
      .add(batch_iter)
      .execute()
      .await
      .map_err(|e| anyhow!("Failed to store summary embedding: {}", e))?;

    Ok(())
  }

  /// Count stored rows; a table that was never created holds none
  pub async fn count_rows(&self) -> Result<usize> {
    if !self.table_exists().await? {
      return Ok(0);
    }
    let table = self.get_table().await?;
    let count = table.count_rows(None).await.map_err(|e| anyhow!("Failed to count rows: {}", e))?;
    Ok(count)
  }
}
