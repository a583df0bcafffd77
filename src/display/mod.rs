//! Display formatting for terminal output
//!
//! Renders the dashboard, the full history and single-record details as
//! plain strings; the CLI only prints them.

pub mod dashboard;
pub mod expense;
pub mod history;

pub use dashboard::format_dashboard;
pub use expense::{format_expense_details, format_expense_row};
pub use history::format_history;

use chrono::NaiveDate;

/// Short date, e.g. "17 Dec"
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

/// Long date, e.g. "17 December 2025"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Truncate a string to fit in a column
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
