//! Core data models for Expense Card

pub mod amount;
pub mod expense;
pub mod ids;

pub use amount::{Amount, AmountParseError};
pub use expense::{Expense, ExpenseDraft, ExpenseFields, ExpenseValidationError, DATE_FORMAT};
pub use ids::ExpenseId;
