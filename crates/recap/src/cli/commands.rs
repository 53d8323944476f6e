use anyhow::{Context, Result};
use colored::*;
use serde::Deserialize;
use std::path::Path;

use crate::cli::client::{ClientConfig, RecapClient};
use crate::cli::display::{display_search_result, display_status, display_summary};
use crate::server::models::task::{TaskBatch, TaskRecord};

/// A tasks file holds either a full batch or a bare list of tasks
#[derive(Deserialize)]
#[serde(untagged)]
enum TasksFile {
  Batch(TaskBatch),
  Tasks(Vec<TaskRecord>),
}

/// Read a batch of tasks from a JSON file, applying a label override if given
pub fn load_batch(path: &Path, label: Option<String>) -> Result<TaskBatch> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read tasks file {}", path.display()))?;
  let parsed: TasksFile = serde_json::from_str(&raw)
    .with_context(|| format!("Invalid tasks file {}", path.display()))?;

  let batch = match parsed {
    TasksFile::Batch(batch) => batch,
    TasksFile::Tasks(tasks) => TaskBatch::new(tasks),
  };

  Ok(match label {
    Some(label) => batch.with_label(label),
    None => batch,
  })
}

/// Generate and store a summary for the tasks in `path`
pub async fn summarize(
  config: ClientConfig,
  path: &Path,
  label: Option<String>,
) -> Result<()> {
  let batch = load_batch(path, label)?;
  let client = RecapClient::with_config(config)?;

  println!("{} Summarizing {} task(s)...", "→".cyan(), batch.tasks.len());
  let response = client.weekly_summary(&batch).await?;

  display_summary(&response);
  println!("{} Stored under {}", "✓".green(), response.label.yellow());
  Ok(())
}

/// Search stored summaries
pub async fn search(config: ClientConfig, query: &str, k: Option<usize>) -> Result<()> {
  let client = RecapClient::with_config(config)?;
  let response = client.search(query, k).await?;

  if response.results.is_empty() {
    println!("No matching summaries found.");
    return Ok(());
  }

  for (i, result) in response.results.iter().enumerate() {
    display_search_result(i + 1, result);
  }
  Ok(())
}

/// Show server status
pub async fn status(config: ClientConfig) -> Result<()> {
  let client = RecapClient::with_config(config)?;
  let status = client.status().await?;
  display_status(&status);
  Ok(())
}

/// Store the sample summaries directly into the local index
#[cfg(feature = "ml-features")]
pub async fn seed(data_dir: &Path) -> Result<()> {
  let store = crate::server::server::open_store(data_dir).await?;
  let stored = crate::server::seed::seed_samples(&store).await?;

  for record in &stored {
    println!("{} {}", "✓".green(), record.label.yellow());
  }
  let location = data_dir.display().to_string();
  println!("Seeded {} sample summaries into {}", stored.len(), location.cyan());
  Ok(())
}
