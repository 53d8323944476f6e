//! Shared handles passed to every handler

use std::path::PathBuf;
use std::sync::Arc;

use crate::server::services::generator::SummaryGenerator;
use crate::server::services::summary_store::SummaryStore;

/// Application state held by the router.
///
/// Built once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<SummaryStore>,
  pub generator: Arc<dyn SummaryGenerator>,
  pub data_dir: PathBuf,
}

impl AppState {
  pub fn new(
    store: Arc<SummaryStore>,
    generator: Arc<dyn SummaryGenerator>,
    data_dir: PathBuf,
  ) -> Self {
    Self { store, generator, data_dir }
  }
}
