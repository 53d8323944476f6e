//! Recap REST Server
//!
//! Standalone HTTP server for weekly summary generation and search.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use recap::logging::init_tracing;
use recap::server::config::ServerConfig;
use recap::server::server::start_server;

#[derive(Parser)]
#[command(name = "recap_server")]
#[command(about = "Recap REST API Server")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of Kernelle Software"))]
struct Args {
  #[command(flatten)]
  config: ServerConfig,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  dotenvy::dotenv().ok();
  let args = Args::parse();

  init_tracing(args.verbose);
  info!(version = env!("CARGO_PKG_VERSION"), bind = %args.config.bind, "starting recap server");

  start_server(args.config).await
}
