//! Stored summaries and search matches

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label shown for records that were stored without one
pub const UNKNOWN_WEEK: &str = "Unknown week";

/// A generated summary as persisted in the vector index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
  pub id: String,
  pub text: String,
  pub label: String,
  pub created_at: DateTime<Utc>,
}

/// A stored summary ranked against a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMatch {
  pub text: String,
  /// `1 - distance`, rounded to three decimals and deliberately unclamped
  pub similarity: f64,
  pub label: String,
}

/// Convert an index distance into the similarity reported to clients
pub fn similarity_from_distance(distance: f32) -> f64 {
  let similarity = 1.0 - f64::from(distance);
  (similarity * 1000.0).round() / 1000.0
}
