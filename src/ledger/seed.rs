//! Seed dataset
//!
//! Fixed records adopted when no valid ledger has been persisted yet. The
//! literal values are part of the on-disk contract of a fresh install and
//! add up to [`SEED_TOTAL`].

use chrono::NaiveDate;

use crate::models::{Amount, Expense, ExpenseId};

/// Sum of all seed amounts
pub const SEED_TOTAL: f64 = 1864.0;

const fn december(day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(2025, 12, day) {
        Some(date) => date,
        None => panic!("seed date out of range"),
    }
}

/// (id, date, item, whole amount)
const SEED_ROWS: [(&str, NaiveDate, &str, u32); 15] = [
    ("1", december(17), "Ticket", 65),
    ("2", december(17), "Rapido", 110),
    ("3", december(17), "Kurkure", 20),
    ("4", december(17), "Namkeen", 20),
    ("5", december(17), "Kachori", 20),
    ("6", december(17), "Rapido", 30),
    ("7", december(17), "Chai", 50),
    ("8", december(17), "Petrol", 50),
    ("9", december(17), "Roti", 30),
    ("10", december(21), "Recharge", 349),
    ("11", december(25), "Roti", 60),
    ("12", december(25), "Halwa", 50),
    ("13", december(25), "Puncture", 50),
    ("14", december(26), "Petrol", 110),
    ("15", december(27), "Given to Ammi: Cash", 850),
];

/// Build the seed records in their canonical order
pub fn seed_expenses() -> Vec<Expense> {
    SEED_ROWS
        .iter()
        .map(|&(id, date, item, amount)| Expense {
            id: ExpenseId::from(id),
            date,
            item: item.to_string(),
            amount: Amount::whole(amount),
            note: None,
        })
        .collect()
}
