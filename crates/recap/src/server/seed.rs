//! Sample summaries for a fresh index

use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;
use crate::server::models::summary::SummaryRecord;
use crate::server::models::week::{format_range, week_range};
use crate::server::services::summary_store::SummaryStore;

const SAMPLE_SUMMARIES: [(i32, u32, u32, &str); 3] = [
  (
    2024,
    1,
    1,
    "This week you completed several medium-focus tasks and made solid progress. \
     Focus was generally consistent. Try adding high-focus deep work sessions next week.",
  ),
  (
    2024,
    1,
    8,
    "You had fewer tasks this week and focus was a bit low. To improve, set clear goals \
     at the start of the week and limit distractions during work time.",
  ),
  (
    2024,
    1,
    15,
    "Strong productivity across the board this week. High-focus work was prioritized well. \
     Maintain momentum by planning your top 3 weekly priorities ahead of time.",
  ),
];

/// The sample summaries paired with the label of the week each one covers
pub fn sample_summaries() -> Vec<(String, &'static str)> {
  SAMPLE_SUMMARIES
    .iter()
    .filter_map(|&(year, month, day, text)| {
      let (start, end) = week_range(NaiveDate::from_ymd_opt(year, month, day)?);
      Some((format_range(start, end), text))
    })
    .collect()
}

/// Embed and store every sample summary
pub async fn seed_samples(store: &SummaryStore) -> Result<Vec<SummaryRecord>> {
  let mut stored = Vec::new();
  for (label, text) in sample_summaries() {
    stored.push(store.store(text, &label).await?);
  }

  info!(count = stored.len(), "seeded sample summaries");
  Ok(stored)
}
