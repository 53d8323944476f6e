//! REST server startup

use anyhow::{Context, Result};
use axum::serve;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::server::config::ServerConfig;
use crate::server::routing::{cors_layer, create_router};
use crate::server::services::embeddings::EMBEDDING_DIMENSION;
use crate::server::services::generator::AnthropicGenerator;
use crate::server::services::lancedb::{LanceDbIndex, DEFAULT_TABLE_NAME};
use crate::server::services::onnx_embedder::OnnxEmbedder;
use crate::server::services::summary_store::SummaryStore;
use crate::server::state::AppState;

/// Load the embedding model and open the on-disk index
pub async fn open_store(data_dir: &Path) -> Result<SummaryStore> {
  info!(data_dir = %data_dir.display(), "opening summary index");
  let index = LanceDbIndex::open(data_dir, DEFAULT_TABLE_NAME, EMBEDDING_DIMENSION).await?;

  info!("loading embedding model");
  let embedder = OnnxEmbedder::load().await.context("Failed to load embedding model")?;

  Ok(SummaryStore::new(Arc::new(embedder), Arc::new(index)))
}

/// Start the REST server
pub async fn start_server(config: ServerConfig) -> Result<()> {
  let data_dir = config.storage.data_dir.clone();
  let store = open_store(&data_dir).await?;
  let generator = AnthropicGenerator::new(config.generator_config())?;

  let state = AppState::new(Arc::new(store), Arc::new(generator), data_dir);
  let app = create_router(state, cors_layer(&config.allowed_origin)?);

  let listener = TcpListener::bind(config.bind)
    .await
    .with_context(|| format!("Failed to bind {}", config.bind))?;
  info!(addr = %config.bind, origin = %config.allowed_origin, "recap server listening");

  match serve(listener, app).await {
    Ok(()) => {
      info!("server shut down gracefully");
      Ok(())
    }
    Err(e) => {
      error!("server error: {e}");
      Err(anyhow::anyhow!("Server error: {}", e))
    }
  }
}
