//! Field-level changes between two versions of an expense

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Amount, Expense, DATE_FORMAT};

/// One edited field with its old and new value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "lowercase")]
pub enum FieldChange {
    Date { from: NaiveDate, to: NaiveDate },
    Item { from: String, to: String },
    Amount { from: Amount, to: Amount },
    Note { from: Option<String>, to: Option<String> },
}

impl FieldChange {
    /// Render as `field: old -> new`, with amounts in `currency`
    pub fn describe(&self, currency: &str) -> String {
        match self {
            Self::Date { from, to } => format!(
                "date: {} -> {}",
                from.format(DATE_FORMAT),
                to.format(DATE_FORMAT)
            ),
            Self::Item { from, to } => format!("item: \"{}\" -> \"{}\"", from, to),
            Self::Amount { from, to } => format!(
                "amount: {} -> {}",
                from.format_with_symbol(currency),
                to.format_with_symbol(currency)
            ),
            Self::Note { from, to } => format!("note: {} -> {}", note(from), note(to)),
        }
    }
}

fn note(value: &Option<String>) -> String {
    match value {
        Some(text) => format!("\"{}\"", text),
        None => "(none)".to_string(),
    }
}

/// Every editable field that differs between `before` and `after`
pub fn field_changes(before: &Expense, after: &Expense) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if before.date != after.date {
        changes.push(FieldChange::Date {
            from: before.date,
            to: after.date,
        });
    }
    if before.item != after.item {
        changes.push(FieldChange::Item {
            from: before.item.clone(),
            to: after.item.clone(),
        });
    }
    if before.amount != after.amount {
        changes.push(FieldChange::Amount {
            from: before.amount,
            to: after.amount,
        });
    }
    if before.note != after.note {
        changes.push(FieldChange::Note {
            from: before.note.clone(),
            to: after.note.clone(),
        });
    }

    changes
}
