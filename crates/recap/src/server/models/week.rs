//! Week labels for stored summaries

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{RecapError, Result};
use crate::server::models::task::TaskBatch;

const LABEL_DATE_FORMAT: &str = "%a %d %b %Y";

/// Monday and Sunday of the week containing `date`
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
  let start = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
  let end = start + Duration::days(6);
  (start, end)
}

/// Render a range as `Mon 01 Jan 2024 – Sun 07 Jan 2024`
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
  format!("{} – {}", start.format(LABEL_DATE_FORMAT), end.format(LABEL_DATE_FORMAT))
}

/// Resolve the label a batch's summary is stored under.
///
/// An explicit label wins verbatim. Otherwise the week is taken from the
/// first task as submitted, not the earliest one.
pub fn derive_label(batch: &TaskBatch) -> Result<String> {
  if let Some(label) = batch.explicit_label() {
    return Ok(label.to_string());
  }

  let first = batch.tasks.first().ok_or(RecapError::EmptyBatch)?;
  let (start, end) = week_range(first.date);
  Ok(format_range(start, end))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::server::models::task::{Focus, TaskRecord};

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn task_on(day: NaiveDate) -> TaskRecord {
    TaskRecord::new("Deep work", 60, Focus::High, day)
  }

  #[test]
  fn test_week_range_midweek() {
    assert_eq!(week_range(date(2024, 1, 3)), (date(2024, 1, 1), date(2024, 1, 7)));
  }

  #[test]
  fn test_week_range_on_boundaries() {
    assert_eq!(week_range(date(2024, 1, 1)), (date(2024, 1, 1), date(2024, 1, 7)));
    assert_eq!(week_range(date(2024, 1, 7)), (date(2024, 1, 1), date(2024, 1, 7)));
  }

  #[test]
  fn test_week_range_crosses_month_and_year() {
    assert_eq!(week_range(date(2024, 5, 30)), (date(2024, 5, 27), date(2024, 6, 2)));
    assert_eq!(week_range(date(2025, 1, 1)), (date(2024, 12, 30), date(2025, 1, 5)));
  }

  #[test]
  fn test_format_range_pads_days_and_uses_en_dash() {
    let label = format_range(date(2024, 5, 27), date(2024, 6, 2));
    assert_eq!(label, "Mon 27 May 2024 \u{2013} Sun 02 Jun 2024");
  }

  #[test]
  fn test_derive_label_from_wednesday() {
    let batch = TaskBatch::new(vec![task_on(date(2024, 1, 3))]);
    assert_eq!(derive_label(&batch).unwrap(), "Mon 01 Jan 2024 – Sun 07 Jan 2024");
  }

  #[test]
  fn test_derive_label_uses_first_task_not_earliest() {
    let batch = TaskBatch::new(vec![task_on(date(2024, 1, 10)), task_on(date(2024, 1, 3))]);
    assert_eq!(derive_label(&batch).unwrap(), "Mon 08 Jan 2024 – Sun 14 Jan 2024");
  }

  #[test]
  fn test_explicit_label_is_verbatim() {
    let batch =
      TaskBatch::new(vec![task_on(date(2024, 1, 3))]).with_label("  Launch week (draft)  ");
    assert_eq!(derive_label(&batch).unwrap(), "  Launch week (draft)  ");
  }

  #[test]
  fn test_explicit_label_without_tasks() {
    let batch = TaskBatch::new(Vec::new()).with_label("Holiday week");
    assert_eq!(derive_label(&batch).unwrap(), "Holiday week");
  }

  #[test]
  fn test_empty_batch_without_label_fails() {
    let err = derive_label(&TaskBatch::default()).unwrap_err();
    assert!(matches!(err, RecapError::EmptyBatch));

    let err = derive_label(&TaskBatch::default().with_label("")).unwrap_err();
    assert!(matches!(err, RecapError::EmptyBatch));
  }
}
