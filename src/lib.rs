//! Expense Card - record daily spendings and keep a running total
//!
//! The heart of the crate is the [`ledger::LedgerStore`]: it owns the list of
//! expense records, derives totals and day groups, and writes the whole list
//! back to a storage slot after every change.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense records, ids, amounts and form input
//! - `storage`: Key-value slots backed by JSON files
//! - `ledger`: The ledger store, derived views and seed dataset
//! - `audit`: Audit logging of ledger mutations
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_card::ledger::LedgerStore;
//! use expense_card::models::ExpenseDraft;
//! use expense_card::storage::FileSlotStore;
//!
//! let mut store = LedgerStore::open(FileSlotStore::new("/tmp/expense-card"))?;
//! store.add(&ExpenseDraft::new("Tea", "2025-12-28", "15"))?;
//! println!("Total: {}", store.total());
//! # Ok::<(), expense_card::ExpenseError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
