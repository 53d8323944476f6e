//! REST server for weekly summaries

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routing;
pub mod seed;
pub mod services;
pub mod state;
pub mod types;

#[cfg(feature = "ml-features")]
pub mod server;
