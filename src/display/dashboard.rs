//! Dashboard view: total, most recent entries and the latest day groups

use crate::config::Settings;
use crate::ledger::LedgerStore;
use crate::storage::SlotStore;

use super::{format_expense_row, long_date, truncate};

pub fn format_dashboard<S: SlotStore>(store: &LedgerStore<S>, settings: &Settings) -> String {
    let currency = settings.currency_symbol.as_str();
    let mut output = String::new();

    output.push_str("Total Spent\n");
    output.push_str(&format!("{}\n\n", store.total().format_with_symbol(currency)));

    output.push_str("Recent Entries\n");
    output.push_str(&"-".repeat(44));
    output.push('\n');

    let recent = store.recent_entries(settings.recent_limit);
    if recent.is_empty() {
        output.push_str("No expenses recorded yet.\n");
    }
    for expense in recent {
        output.push_str(&format_expense_row(expense, currency));
        output.push('\n');
    }
    output.push_str("\nRun 'expense history' to view all records.\n");

    let groups = store.grouped_by_date();
    if groups.is_empty() {
        return output;
    }

    output.push_str("\nRecent Activity\n");
    for group in groups.iter().take(settings.group_limit) {
        output.push('\n');
        output.push_str(&format!(
            "{} ({})\n",
            long_date(group.date),
            group.total().format_with_symbol(currency)
        ));
        for expense in &group.expenses {
            output.push_str(&format!(
                "  {:32} {:>10}\n",
                truncate(&expense.item, 32),
                expense.amount.format_with_symbol(currency)
            ));
        }
    }

    output
}
