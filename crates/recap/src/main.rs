use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use recap::cli::client::ClientConfig;
use recap::cli::commands;
use recap::logging::init_tracing;
use recap::server::config::{ServerConfig, StorageConfig};
use recap::server::server::start_server;

#[derive(Parser)]
#[command(name = "recap")]
#[command(about = "Recap - weekly productivity summaries with semantic recall")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of Kernelle Software"))]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Run the REST server
  Serve {
    #[command(flatten)]
    config: ServerConfig,
  },
  /// Store the sample summaries in the local index
  Seed {
    #[command(flatten)]
    storage: StorageConfig,
  },
  /// Summarize a JSON file of tasks through a running server
  Summarize {
    #[command(flatten)]
    client: ClientConfig,
    /// Path to a task batch, or a bare list of tasks
    tasks: PathBuf,
    /// Week label to store the summary under
    #[arg(short, long)]
    label: Option<String>,
  },
  /// Search stored summaries
  Search {
    #[command(flatten)]
    client: ClientConfig,
    /// Free-text query
    query: String,
    /// Number of results
    #[arg(short)]
    k: Option<usize>,
  },
  /// Show server status
  Status {
    #[command(flatten)]
    client: ClientConfig,
  },
}

async fn handle(command: Command) -> Result<()> {
  match command {
    Command::Serve { config } => start_server(config).await,
    Command::Seed { storage } => commands::seed(&storage.data_dir).await,
    Command::Summarize { client, tasks, label } => {
      commands::summarize(client, &tasks, label).await
    }
    Command::Search { client, query, k } => commands::search(client, &query, k).await,
    Command::Status { client } => commands::status(client).await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  dotenvy::dotenv().ok();
  let cli = Cli::parse();

  init_tracing(cli.verbose);

  handle(cli.command).await
}
