//! LanceDB-backed vector index for weekly summaries
//!
//! One table in one on-disk directory, opened at startup and reused for the
//! lifetime of the process.

pub mod connection;
pub mod records;
pub mod search;
pub mod table_manager;

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::server::services::vector_index::{IndexHit, IndexRecord, VectorIndex};
use connection::create_connection;
use search::search_nearest;
use table_manager::TableManager;

/// Default table holding summaries
pub const DEFAULT_TABLE_NAME: &str = "weekly_summaries";

/// Vector index persisted with LanceDB.
///
/// LanceDB commits every append as a new table version on disk, so an insert
/// is durable once it returns. Writers are serialized through `write_lock`;
/// this also keeps two first writes from both trying to create the table.
pub struct LanceDbIndex {
  table_manager: TableManager,
  data_dir: PathBuf,
  write_lock: Mutex<()>,
}

impl LanceDbIndex {
  /// Open (or create) the index directory
  pub async fn open(data_dir: &Path, table_name: &str, embedding_dimension: usize) -> Result<Self> {
    let connection = create_connection(data_dir).await?;
    let table_manager = TableManager::new(connection, table_name.to_string(), embedding_dimension);

    Ok(Self { table_manager, data_dir: data_dir.to_path_buf(), write_lock: Mutex::new(()) })
  }

  pub fn data_dir(&self) -> &Path {
    &self.data_dir
  }
}

#[async_trait]
impl VectorIndex for LanceDbIndex {
  async fn insert(&self, record: IndexRecord) -> Result<()> {
    let _guard = self.write_lock.lock().await;

    if self.table_manager.table_exists().await? {
      self.table_manager.add_record_to_existing_table(&record).await
    } else {
      self.table_manager.create_table_with_first_record(&record).await
    }
  }

  async fn nearest(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<IndexHit>> {
    if limit == 0 || !self.table_manager.table_exists().await? {
      debug!(table = self.table_manager.table_name(), "nothing to search");
      return Ok(Vec::new());
    }

    let table = self.table_manager.get_table().await?;
    search_nearest(&table, query_embedding, limit).await
  }

  async fn count(&self) -> Result<usize> {
    self.table_manager.count_rows().await
  }
}
