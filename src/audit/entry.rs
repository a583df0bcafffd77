//! Audit entries

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseId};

use super::changes::{field_changes, FieldChange};

/// What happened to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Added,
    Edited,
    Deleted,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Added => write!(f, "ADDED"),
            Action::Edited => write!(f, "EDITED"),
            Action::Deleted => write!(f, "DELETED"),
        }
    }
}

/// One ledger mutation, with the record as it was and as it became
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub action: Action,
    pub id: ExpenseId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Expense>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Expense>,

    /// Edited fields; empty unless `action` is `Edited`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
}

impl AuditEntry {
    pub fn for_add(expense: &Expense) -> Self {
        Self {
            at: Utc::now(),
            action: Action::Added,
            id: expense.id.clone(),
            before: None,
            after: Some(expense.clone()),
            changes: Vec::new(),
        }
    }

    pub fn for_update(before: &Expense, after: &Expense) -> Self {
        Self {
            at: Utc::now(),
            action: Action::Edited,
            id: after.id.clone(),
            before: Some(before.clone()),
            after: Some(after.clone()),
            changes: field_changes(before, after),
        }
    }

    pub fn for_remove(expense: &Expense) -> Self {
        Self {
            at: Utc::now(),
            action: Action::Deleted,
            id: expense.id.clone(),
            before: Some(expense.clone()),
            after: None,
            changes: Vec::new(),
        }
    }

    /// The record after the change, or the removed record for a delete
    pub fn subject(&self) -> Option<&Expense> {
        self.after.as_ref().or(self.before.as_ref())
    }

    /// One summary line plus one indented line per edited field
    pub fn describe(&self, currency: &str) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action,
            self.id
        );

        if let Some(expense) = self.subject() {
            output.push_str(&format!(
                ": {} {} on {}",
                expense.item,
                expense.amount.format_with_symbol(currency),
                expense.date
            ));
        }

        for change in &self.changes {
            output.push_str("\n  ");
            output.push_str(&change.describe(currency));
        }

        output
    }
}
