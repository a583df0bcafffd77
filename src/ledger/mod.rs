//! The expense ledger
//!
//! `LedgerStore` owns the record list and writes it through to a storage
//! slot; `views` derives totals, date groups and recent entries; `seed` holds
//! the fallback dataset.

pub mod seed;
pub mod store;
pub mod views;

pub use seed::{seed_expenses, SEED_TOTAL};
pub use store::{LedgerStore, LoadSource, STORAGE_KEY};
pub use views::DateGroup;
