//! ONNX Runtime sentence embedder (all-MiniLM-L6-v2)

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use hf_hub::api::tokio::Api;
use ndarray::Array2;
use ort::{
  execution_providers::{CPUExecutionProvider, ExecutionProviderDispatch},
  session::Session,
  value::Value,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::info;

use crate::server::services::embeddings::{mean_pool, normalize_embedding, Embedder};

const MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";
const TOKENIZER_FILE: &str = "tokenizer.json";
const MODEL_FILE: &str = "onnx/model.onnx";
const MAX_SEQUENCE_LENGTH: usize = 256;

struct EmbeddingModel {
  session: Session,
  tokenizer: Tokenizer,
}

struct ModelFiles {
  tokenizer_file: PathBuf,
  model_path: PathBuf,
}

#[cfg(not(tarpaulin_include))]
impl EmbeddingModel {
  async fn load() -> Result<Self> {
    info!(model = MODEL_NAME, "loading embedding model");

    let files = Self::download_model().await?;
    let tokenizer = Self::load_tokenizer(files.tokenizer_file)?;
    let session = Self::load_session(files.model_path)?;
    Ok(Self { session, tokenizer })
  }

  async fn download_model() -> Result<ModelFiles> {
    let api = Api::new().map_err(|e| anyhow!("HF API initialization failed: {}", e))?;
    let repo = api.model(MODEL_NAME.to_string());

    let tokenizer_file =
      repo.get(TOKENIZER_FILE).await.map_err(|e| anyhow!("Failed to download tokenizer: {}", e))?;
    let model_path =
      repo.get(MODEL_FILE).await.map_err(|e| anyhow!("Failed to download ONNX model: {}", e))?;

    Ok(ModelFiles { tokenizer_file, model_path })
  }

  fn load_tokenizer(path: PathBuf) -> Result<Tokenizer> {
    let mut tokenizer =
      Tokenizer::from_file(path).map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;
    tokenizer
      .with_truncation(Some(TruncationParams {
        max_length: MAX_SEQUENCE_LENGTH,
        ..Default::default()
      }))
      .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;
    Ok(tokenizer)
  }

  fn load_session(model_path: PathBuf) -> Result<Session> {
    let providers: Vec<ExecutionProviderDispatch> = vec![CPUExecutionProvider::default().into()];
    let session =
      Session::builder()?.with_execution_providers(providers)?.commit_from_file(model_path)?;
    Ok(session)
  }

  fn embed(&mut self, text: &str) -> Result<Vec<f32>> {
    let encoding =
      self.tokenizer.encode(text, true).map_err(|e| anyhow!("Tokenization failed: {}", e))?;
    let attention_mask = encoding.get_attention_mask().to_vec();

    let wants_type_ids = self.session.inputs.iter().any(|input| input.name == "token_type_ids");

    let mut inputs = HashMap::new();
    inputs.insert("input_ids".to_string(), to_tensor(encoding.get_ids())?);
    inputs.insert("attention_mask".to_string(), to_tensor(&attention_mask)?);
    if wants_type_ids {
      inputs.insert("token_type_ids".to_string(), to_tensor(encoding.get_type_ids())?);
    }

    let outputs = self.session.run(inputs)?;
    let hidden_state = outputs
      .get("last_hidden_state")
      .ok_or_else(|| anyhow!("Model produced no 'last_hidden_state' output"))?;

    let (shape, data) = hidden_state.try_extract_tensor::<f32>()?;
    let dims: &[i64] = shape.as_ref();
    let pooled = mean_pool(dims, data, &attention_mask)?;
    Ok(normalize_embedding(pooled))
  }
}

fn to_tensor(values: &[u32]) -> Result<Value> {
  let as_i64: Vec<i64> = values.iter().map(|&x| i64::from(x)).collect();
  let array: Array2<i64> = Array2::from_shape_vec((1, values.len()), as_i64)?;
  Ok(Value::from_array(array)?.into())
}

/// Sentence embedder backed by a local ONNX Runtime session.
///
/// Inference needs exclusive access to the session, so calls are serialized
/// through a mutex and run on the blocking thread pool.
#[derive(Clone)]
pub struct OnnxEmbedder {
  model: Arc<Mutex<EmbeddingModel>>,
}

#[cfg(not(tarpaulin_include))]
impl OnnxEmbedder {
  /// Download (or reuse the cached copy of) the model and open a session
  pub async fn load() -> Result<Self> {
    let model = EmbeddingModel::load().await?;
    Ok(Self { model: Arc::new(Mutex::new(model)) })
  }
}

#[cfg(not(tarpaulin_include))]
#[async_trait]
impl Embedder for OnnxEmbedder {
  async fn embed(&self, text: &str) -> Result<Vec<f32>> {
    let model = Arc::clone(&self.model);
    let text = text.to_string();

    tokio::task::spawn_blocking(move || {
      let mut guard = model.lock().map_err(|_| anyhow!("Failed to lock model mutex"))?;
      guard.embed(&text)
    })
    .await
    .map_err(|e| anyhow!("Embedding task failed: {}", e))?
  }
}
