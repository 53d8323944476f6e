//! Recap - weekly productivity summaries with semantic recall
//!
//! Turns a week of tracked tasks into a short coaching summary, stores it in a
//! local vector index and finds similar past weeks by free-text query.

pub mod cli;
pub mod error;
pub mod logging;
pub mod server;
