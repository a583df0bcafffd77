//! Audit log CLI command

use crate::audit::AuditLog;
use crate::error::ExpenseResult;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(log: &AuditLog, limit: usize, currency: &str) -> ExpenseResult<()> {
    let entries = log.latest(limit)?;

    if entries.is_empty() {
        println!("No audit entries recorded.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.describe(currency));
    }

    Ok(())
}
