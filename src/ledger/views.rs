//! Derived views over the expense list
//!
//! None of these own data; they borrow from the ledger and are recomputed on
//! every call.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Amount, Expense};

/// Records sharing one calendar date, in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub date: NaiveDate,
    pub expenses: Vec<&'a Expense>,
}

impl DateGroup<'_> {
    /// Sum of the amounts spent on this date
    pub fn total(&self) -> Amount {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

/// Sum of all amounts; zero for an empty list
pub fn total(expenses: &[Expense]) -> Amount {
    expenses.iter().map(|e| e.amount).sum()
}

/// Partition records by date, most recent date first
pub fn group_by_date(expenses: &[Expense]) -> Vec<DateGroup<'_>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&Expense>> = BTreeMap::new();
    for expense in expenses {
        by_date.entry(expense.date).or_default().push(expense);
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, expenses)| DateGroup { date, expenses })
        .collect()
}

/// The last `n` records by insertion order, most recently added first
pub fn recent(expenses: &[Expense], n: usize) -> Vec<&Expense> {
    expenses.iter().rev().take(n).collect()
}
