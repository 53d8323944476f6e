#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use recap::error::RecapError;
use recap::server::models::task::TaskBatch;
use recap::server::routing::{cors_layer, create_router};
use recap::server::services::embeddings::Embedder;
use recap::server::services::generator::SummaryGenerator;
use recap::server::services::summary_store::SummaryStore;
use recap::server::services::vector_index::{IndexHit, IndexRecord, VectorIndex};
use recap::server::state::AppState;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Hashes lowercase words into a fixed number of buckets, then L2-normalises.
/// Identical texts embed identically; texts sharing words land close together.
pub struct BagOfWordsEmbedder {
  dimension: usize,
  pub calls: AtomicUsize,
}

impl BagOfWordsEmbedder {
  pub fn new(dimension: usize) -> Self {
    Self { dimension, calls: AtomicUsize::new(0) }
  }

  fn bucket(&self, word: &str) -> usize {
    // FNV-1a
    let hash = word
      .bytes()
      .fold(0xcbf29ce484222325u64, |h, b| (h ^ u64::from(b)).wrapping_mul(0x100000001b3));
    (hash % self.dimension as u64) as usize
  }
}

impl Default for BagOfWordsEmbedder {
  fn default() -> Self {
    Self::new(1024)
  }
}

#[async_trait]
impl Embedder for BagOfWordsEmbedder {
  async fn embed(&self, text: &str) -> Result<Vec<f32>> {
    self.calls.fetch_add(1, Ordering::SeqCst);

    let mut vector = vec![0.0f32; self.dimension];
    for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
      vector[self.bucket(&word.to_lowercase())] += 1.0;
    }

    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
      return Err(anyhow!("text has no words to embed"));
    }
    Ok(vector.into_iter().map(|x| x / norm).collect())
  }
}

/// Brute-force cosine-distance index held in memory
#[derive(Default)]
pub struct InMemoryIndex {
  records: Mutex<Vec<IndexRecord>>,
}

impl InMemoryIndex {
  pub fn records(&self) -> Vec<IndexRecord> {
    self.records.lock().unwrap().clone()
  }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
  let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
  let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
  let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
  1.0 - dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
  async fn insert(&self, record: IndexRecord) -> Result<()> {
    self.records.lock().unwrap().push(record);
    Ok(())
  }

  async fn nearest(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<IndexHit>> {
    let mut hits: Vec<IndexHit> = self
      .records
      .lock()
      .unwrap()
      .iter()
      .map(|r| IndexHit {
        id: r.id.clone(),
        text: r.text.clone(),
        label: r.label.clone(),
        distance: cosine_distance(query_embedding, &r.embedding),
      })
      .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits.truncate(limit);
    Ok(hits)
  }

  async fn count(&self) -> Result<usize> {
    Ok(self.records.lock().unwrap().len())
  }
}

/// Index whose every operation fails, standing in for an unreachable disk
pub struct BrokenIndex;

#[async_trait]
impl VectorIndex for BrokenIndex {
  async fn insert(&self, _record: IndexRecord) -> Result<()> {
    Err(anyhow!("index directory is read-only"))
  }

  async fn nearest(&self, _query_embedding: &[f32], _limit: usize) -> Result<Vec<IndexHit>> {
    Err(anyhow!("index directory is unreadable"))
  }

  async fn count(&self) -> Result<usize> {
    Err(anyhow!("index directory is unreadable"))
  }
}

/// Generator returning a canned reply and counting how often it was asked
pub struct ScriptedGenerator {
  reply: std::result::Result<String, u16>,
  pub calls: AtomicUsize,
}

impl ScriptedGenerator {
  pub fn replying(text: &str) -> Self {
    Self { reply: Ok(text.to_string()), calls: AtomicUsize::new(0) }
  }

  pub fn failing_with(status: u16) -> Self {
    Self { reply: Err(status), calls: AtomicUsize::new(0) }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl SummaryGenerator for ScriptedGenerator {
  async fn generate(&self, _batch: &TaskBatch) -> recap::error::Result<String> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    match &self.reply {
      Ok(text) => Ok(text.clone()),
      Err(status) => Err(RecapError::external(Some(*status), "provider said no")),
    }
  }
}

pub fn memory_store() -> (SummaryStore, Arc<BagOfWordsEmbedder>, Arc<InMemoryIndex>) {
  let embedder = Arc::new(BagOfWordsEmbedder::default());
  let index = Arc::new(InMemoryIndex::default());
  (SummaryStore::new(embedder.clone(), index.clone()), embedder, index)
}

pub fn router_with(store: SummaryStore, generator: Arc<ScriptedGenerator>) -> axum::Router {
  let state = AppState::new(Arc::new(store), generator, "/tmp/recap-test".into());
  create_router(state, cors_layer(TEST_ORIGIN).unwrap())
}
