//! Full history view: every day group with its records as a table

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::ledger::DateGroup;
use crate::models::Amount;

use super::{short_date, truncate};

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format all day groups, most recent first, followed by the grand total
pub fn format_history(groups: &[DateGroup<'_>], total: Amount, currency: &str) -> String {
    if groups.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut output = String::new();

    for group in groups {
        output.push_str(&format!(
            "{}  ({} entries, {})\n",
            short_date(group.date),
            group.expenses.len(),
            group.total().format_with_symbol(currency)
        ));

        let rows = group.expenses.iter().map(|e| HistoryRow {
            id: e.id.to_string(),
            item: truncate(&e.item, 32),
            note: e.note.as_deref().map(|n| truncate(n, 32)).unwrap_or_default(),
            amount: e.amount.format_with_symbol(currency),
        });

        let mut table = Table::new(rows);
        table.with(Style::psql());
        output.push_str(&table.to_string());
        output.push_str("\n\n");
    }

    output.push_str(&format!("Total: {}\n", total.format_with_symbol(currency)));
    output
}
