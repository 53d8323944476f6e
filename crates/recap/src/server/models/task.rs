//! Task log input types
//!
//! These only live for the duration of a single generate-and-store request.
//! Deserialization doubles as input validation: a wrong type, an unknown
//! focus level or an unparseable date rejects the whole batch.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{RecapError, Result};

/// How focused the user was while working on a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
  Low,
  Medium,
  High,
}

impl fmt::Display for Focus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Focus::Low => "Low",
      Focus::Medium => "Medium",
      Focus::High => "High",
    };
    f.write_str(name)
  }
}

/// A single logged task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
  /// Task description
  pub name: String,

  /// Minutes spent on the task
  pub time_spent: i64,

  /// Focus level while working on it
  pub focus: Focus,

  /// Day the task was done (ISO date or date-time)
  #[serde(deserialize_with = "deserialize_task_date")]
  pub date: NaiveDate,
}

impl TaskRecord {
  pub fn new(name: impl Into<String>, time_spent: i64, focus: Focus, date: NaiveDate) -> Self {
    Self { name: name.into(), time_spent, focus, date }
  }
}

/// A week's worth of tasks submitted for summarization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaskBatch {
  /// Tasks in the order the user logged them
  pub tasks: Vec<TaskRecord>,

  /// Week label; derived from the first task's date when absent or empty
  #[serde(default)]
  pub label: Option<String>,
}

impl TaskBatch {
  pub fn new(tasks: Vec<TaskRecord>) -> Self {
    Self { tasks, label: None }
  }

  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  /// The caller-supplied label, if it carries any text
  pub fn explicit_label(&self) -> Option<&str> {
    self.label.as_deref().filter(|label| !label.is_empty())
  }
}

/// Parse the date formats clients send for a task.
///
/// Plain dates, RFC 3339 timestamps (what a browser `Date` serializes to) and
/// naive ISO date-times are accepted. The calendar date is taken as written,
/// without shifting between timezones.
const NAIVE_DATETIME_FORMATS: [&str; 4] =
  ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

pub fn parse_task_date(raw: &str) -> Result<NaiveDate> {
  let raw = raw.trim();

  if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    return Ok(date);
  }
  if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
    return Ok(timestamp.date_naive());
  }
  for format in NAIVE_DATETIME_FORMATS {
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
      return Ok(timestamp.date());
    }
  }

  Err(RecapError::validation(format!("unrecognized task date '{raw}'")))
}

fn deserialize_task_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(deserializer)?;
  parse_task_date(&raw).map_err(serde::de::Error::custom)
}
