//! Display formatting utilities for CLI output

use colored::*;

use crate::server::types::{SearchResultData, StatusResponse, WeeklySummaryResponse};

const WRAP_WIDTH: usize = 80;

/// Wrap text to fit within a specified width
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.split('\n') {
    if paragraph.trim().is_empty() {
      lines.push(String::new());
      continue;
    }

    let mut current_line = String::new();
    for word in paragraph.split_whitespace() {
      if current_line.is_empty() {
        current_line = word.to_string();
      } else if current_line.len() + 1 + word.len() <= width {
        current_line.push(' ');
        current_line.push_str(word);
      } else {
        lines.push(current_line);
        current_line = word.to_string();
      }
    }

    if !current_line.is_empty() {
      lines.push(current_line);
    }
  }

  lines
}

/// Color a similarity score by how close the match is
pub fn format_similarity(similarity: f64) -> ColoredString {
  let text = format!("{similarity:.3}");
  if similarity >= 0.75 {
    text.green().bold()
  } else if similarity >= 0.5 {
    text.yellow()
  } else {
    text.dimmed()
  }
}

pub fn display_summary(response: &WeeklySummaryResponse) {
  println!("=== {} ===", response.label.blue().bold());
  for line in wrap_text(&response.summary, WRAP_WIDTH) {
    println!("{line}");
  }
  println!();
}

pub fn display_search_result(rank: usize, result: &SearchResultData) {
  println!(
    "{} {} ({})",
    format!("{rank}.").cyan(),
    result.label.blue().bold(),
    format_similarity(result.similarity)
  );
  for line in wrap_text(&result.summary, WRAP_WIDTH - 3) {
    println!("   {line}");
  }
  println!();
}

pub fn display_status(status: &StatusResponse) {
  println!("{} {}", "Status:".bold(), status.status.green());
  println!("{} {}", "Version:".bold(), status.version);
  println!("{} {}", "Index:".bold(), status.data_dir.cyan());
  println!("{} {}", "Summaries:".bold(), status.summaries);
}
