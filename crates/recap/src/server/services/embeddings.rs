//! Text embeddings for summaries and search queries

use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// Output width of the sentence-embedding model used in production
pub const EMBEDDING_DIMENSION: usize = 384;

/// Maps free text onto a fixed-width vector
#[async_trait]
pub trait Embedder: Send + Sync {
  async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Perform mean pooling over the sequence dimension for sentence embeddings.
///
/// `shape` is `[batch, sequence, hidden]` for a batch of one; padded
/// positions (mask value 0) are excluded from the average.
pub fn mean_pool(shape: &[i64], data: &[f32], attention_mask: &[u32]) -> Result<Vec<f32>> {
  if shape.len() != 3 {
    return Err(anyhow!("Expected a rank-3 hidden state, got shape {:?}", shape));
  }

  let seq_length = shape[1] as usize;
  let hidden_size = shape[2] as usize;

  if data.len() < seq_length * hidden_size {
    return Err(anyhow!(
      "Hidden state has {} values, expected at least {}",
      data.len(),
      seq_length * hidden_size
    ));
  }

  let mut embedding = vec![0.0f32; hidden_size];
  let mut counted = 0usize;

  for token_idx in 0..seq_length {
    if attention_mask.get(token_idx).copied().unwrap_or(1) == 0 {
      continue;
    }
    let start = token_idx * hidden_size;
    for (i, &value) in data[start..start + hidden_size].iter().enumerate() {
      embedding[i] += value;
    }
    counted += 1;
  }

  if counted > 0 {
    for value in embedding.iter_mut() {
      *value /= counted as f32;
    }
  }

  Ok(embedding)
}

/// Normalize embedding vector to unit length
pub fn normalize_embedding(mut embedding: Vec<f32>) -> Vec<f32> {
  let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

  if magnitude < f32::EPSILON {
    tracing::warn!("Zero-magnitude embedding detected - returning unchanged");
    return embedding;
  }

  for value in embedding.iter_mut() {
    *value /= magnitude;
  }

  embedding
}
