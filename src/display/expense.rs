//! Single expense formatting

use crate::models::Expense;

use super::{short_date, truncate};

/// Format one record as a list row
pub fn format_expense_row(expense: &Expense, currency: &str) -> String {
    format!(
        "{:>7}  {:24} {:>10}",
        short_date(expense.date),
        truncate(&expense.item, 24),
        expense.amount.format_with_symbol(currency)
    )
}

/// Format record details for show/edit/delete output
pub fn format_expense_details(expense: &Expense, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("Date:    {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Item:    {}\n", expense.item));
    output.push_str(&format!(
        "Amount:  {}\n",
        expense.amount.format_with_symbol(currency)
    ));

    if let Some(note) = &expense.note {
        output.push_str(&format!("Note:    {}\n", note));
    }

    output
}
