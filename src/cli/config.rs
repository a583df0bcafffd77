//! Configuration CLI command

use clap::Args;

use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};

/// Options for `expense config`; with none given the settings are only shown
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Currency symbol printed in front of amounts
    #[arg(long)]
    pub currency: Option<String>,

    /// Number of recent entries on the dashboard
    #[arg(long)]
    pub recent: Option<usize>,

    /// Number of recent days on the dashboard
    #[arg(long)]
    pub days: Option<usize>,

    /// Turn the audit log on or off
    #[arg(long)]
    pub audit: Option<bool>,
}

impl ConfigArgs {
    fn has_changes(&self) -> bool {
        self.currency.is_some()
            || self.recent.is_some()
            || self.days.is_some()
            || self.audit.is_some()
    }
}

/// Apply the requested changes to `settings`
pub fn apply_config_changes(settings: &mut Settings, args: ConfigArgs) -> ExpenseResult<()> {
    if let Some(currency) = args.currency {
        let currency = currency.trim().to_string();
        if currency.is_empty() {
            return Err(ExpenseError::Validation("Currency symbol cannot be empty".into()));
        }
        settings.currency_symbol = currency;
    }
    if let Some(recent) = args.recent {
        settings.recent_limit = recent;
    }
    if let Some(days) = args.days {
        settings.group_limit = days;
    }
    if let Some(audit) = args.audit {
        settings.audit_enabled = audit;
    }
    Ok(())
}

/// Handle `expense config`: save any changes, then print paths and settings
pub fn handle_config_command(
    paths: &ExpensePaths,
    settings: &mut Settings,
    args: ConfigArgs,
) -> ExpenseResult<()> {
    if args.has_changes() {
        apply_config_changes(settings, args)?;
        settings.save(paths)?;
        println!("Settings saved.");
        println!();
    }

    println!("Expense Card Configuration");
    println!("==========================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Recent entries:  {}", settings.recent_limit);
    println!("  Recent days:     {}", settings.group_limit);
    println!("  Audit enabled:   {}", settings.audit_enabled);

    Ok(())
}
