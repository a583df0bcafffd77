//! Audit logging for Expense Card
//!
//! Every ledger mutation that reaches storage is appended to a line-delimited
//! JSON log with the record before and after the change.

mod changes;
mod entry;
mod log;

pub use changes::{field_changes, FieldChange};
pub use entry::{Action, AuditEntry};
pub use log::AuditLog;
