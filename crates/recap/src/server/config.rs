//! Server configuration from command-line flags and environment variables

use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::server::services::generator::{
  GeneratorConfig, DEFAULT_API_BASE, DEFAULT_API_KEY_VAR, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
  DEFAULT_TIMEOUT_SECS,
};

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Default index location: `~/.recap/index`, or `./.recap/index` without a home directory
pub fn default_data_dir() -> PathBuf {
  dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".recap").join("index")
}

/// Where the vector index lives on disk
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
  /// Directory holding the LanceDB index
  #[arg(long, env = "RECAP_DATA_DIR", default_value_os_t = default_data_dir())]
  pub data_dir: PathBuf,
}

/// Options for `recap serve` and `recap_server`
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
  /// Address to bind the server to
  #[arg(long, env = "RECAP_BIND", default_value = DEFAULT_BIND)]
  pub bind: SocketAddr,

  #[command(flatten)]
  pub storage: StorageConfig,

  /// The single origin allowed by CORS
  #[arg(long, env = "RECAP_ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
  pub allowed_origin: String,

  /// Base URL of the Anthropic API
  #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_API_BASE)]
  pub anthropic_base_url: String,

  /// Model used to write summaries
  #[arg(long, env = "RECAP_MODEL", default_value = DEFAULT_MODEL)]
  pub model: String,

  /// Upper bound on generated tokens
  #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
  pub max_tokens: u32,

  /// Seconds to wait for the summary provider
  #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
  pub generation_timeout_secs: u64,

  /// Name of the environment variable holding the API key
  #[arg(long, default_value = DEFAULT_API_KEY_VAR)]
  pub api_key_env: String,
}

impl ServerConfig {
  pub fn generator_config(&self) -> GeneratorConfig {
    GeneratorConfig {
      api_base: self.anthropic_base_url.clone(),
      model: self.model.clone(),
      max_tokens: self.max_tokens,
      timeout_secs: self.generation_timeout_secs,
      api_key_var: self.api_key_env.clone(),
    }
  }
}
