//! Expense CLI commands
//!
//! Bridges clap arguments to the ledger store: viewing, adding, editing and
//! deleting records.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_dashboard, format_expense_details, format_history};
use crate::error::{ExpenseError, ExpenseResult};
use crate::ledger::LedgerStore;
use crate::models::{Expense, ExpenseDraft, ExpenseId, DATE_FORMAT};
use crate::storage::SlotStore;

use super::confirm::{Confirm, FixedAnswer};

/// Expense commands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Show the total, recent entries and the latest days
    Dashboard,
    /// Show every record grouped by day
    #[command(alias = "all")]
    History,
    /// Print the total amount spent
    Total,
    /// Record a new expense
    Add {
        /// What the money was spent on
        item: String,
        /// Amount spent (e.g. "15" or "12.50")
        amount: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Show one record
    Show {
        /// Expense ID
        id: String,
    },
    /// Edit a record; omitted fields keep their current value
    Edit {
        /// Expense ID
        id: String,
        /// New item
        #[arg(short, long)]
        item: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New note (pass "" to clear it)
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Delete a record after confirmation
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Result of a confirmation-gated delete
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Expense),
    Declined,
    NotFound,
}

/// Ask for confirmation, then remove the record
///
/// Nothing is asked for an unknown id and nothing changes when the user
/// declines.
pub fn delete_with_confirmation<S: SlotStore>(
    store: &mut LedgerStore<S>,
    id: &ExpenseId,
    confirm: &mut dyn Confirm,
) -> ExpenseResult<DeleteOutcome> {
    let Some(expense) = store.get(id) else {
        return Ok(DeleteOutcome::NotFound);
    };

    let prompt = format!(
        "Are you sure you want to delete '{}' ({})?",
        expense.item, expense.date
    );
    if !confirm.confirm(&prompt)? {
        return Ok(DeleteOutcome::Declined);
    }

    Ok(match store.remove(id)? {
        Some(removed) => DeleteOutcome::Deleted(removed),
        None => DeleteOutcome::NotFound,
    })
}

/// Merge edit flags over the record's current values
pub fn edit_draft(
    current: &Expense,
    item: Option<String>,
    amount: Option<String>,
    date: Option<String>,
    note: Option<String>,
) -> ExpenseDraft {
    let mut draft = current.to_draft();
    if let Some(item) = item {
        draft.item = item;
    }
    if let Some(amount) = amount {
        draft.amount = amount;
    }
    if let Some(date) = date {
        draft.date = date;
    }
    if let Some(note) = note {
        draft.note = Some(note);
    }
    draft
}

/// Handle an expense command
pub fn handle_expense_command<S: SlotStore>(
    store: &mut LedgerStore<S>,
    settings: &Settings,
    cmd: ExpenseCommands,
    confirm: &mut dyn Confirm,
) -> ExpenseResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Dashboard => {
            print!("{}", format_dashboard(store, settings));
        }

        ExpenseCommands::History => {
            let groups = store.grouped_by_date();
            print!("{}", format_history(&groups, store.total(), currency));
        }

        ExpenseCommands::Total => {
            println!("{}", store.total().format_with_symbol(currency));
        }

        ExpenseCommands::Add {
            item,
            amount,
            date,
            note,
        } => {
            let date = date.unwrap_or_else(|| {
                chrono::Local::now()
                    .date_naive()
                    .format(DATE_FORMAT)
                    .to_string()
            });

            let mut draft = ExpenseDraft::new(item, date, amount);
            draft.note = note;

            let expense = store.add(&draft)?;
            println!("Added expense: {}", expense.id);
            print!("{}", format_expense_details(&expense, currency));
            println!("Total: {}", store.total().format_with_symbol(currency));
        }

        ExpenseCommands::Show { id } => {
            let id = ExpenseId::from(id);
            let expense = store
                .get(&id)
                .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;
            print!("{}", format_expense_details(expense, currency));
        }

        ExpenseCommands::Edit {
            id,
            item,
            amount,
            date,
            note,
        } => {
            let id = ExpenseId::from(id);
            let current = store
                .get(&id)
                .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;

            let draft = edit_draft(current, item, amount, date, note);
            let updated = store.update(&id, &draft)?;

            println!("Updated expense: {}", updated.id);
            print!("{}", format_expense_details(&updated, currency));
            println!("Total: {}", store.total().format_with_symbol(currency));
        }

        ExpenseCommands::Delete { id, force } => {
            let id = ExpenseId::from(id);
            let outcome = if force {
                delete_with_confirmation(store, &id, &mut FixedAnswer(true))?
            } else {
                delete_with_confirmation(store, &id, confirm)?
            };

            match outcome {
                DeleteOutcome::Deleted(expense) => {
                    println!(
                        "Deleted expense: {} ({} {})",
                        expense.id, expense.date, expense.item
                    );
                    println!("Total: {}", store.total().format_with_symbol(currency));
                }
                DeleteOutcome::Declined => println!("Deletion cancelled."),
                DeleteOutcome::NotFound => {
                    println!("No expense with id '{}'; nothing deleted.", id)
                }
            }
        }
    }

    Ok(())
}
