//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger store.

pub mod audit;
pub mod config;
pub mod confirm;
pub mod expense;

pub use audit::handle_audit_command;
pub use config::{handle_config_command, ConfigArgs};
pub use confirm::{Confirm, FixedAnswer, TerminalConfirm};
pub use expense::{delete_with_confirmation, handle_expense_command, DeleteOutcome, ExpenseCommands};
