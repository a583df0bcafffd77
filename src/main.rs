use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use expense_card::audit::AuditLog;
use expense_card::cli::{
    handle_audit_command, handle_config_command, handle_expense_command, ConfigArgs,
    ExpenseCommands, TerminalConfirm,
};
use expense_card::config::{ExpensePaths, Settings};
use expense_card::ledger::LedgerStore;
use expense_card::storage::FileSlotStore;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Record daily spendings and keep a running total",
    long_about = "Expense Card keeps a small ledger of what you spend each day. \
                  Add entries with an item, amount and optional note, see the \
                  running total, and browse your spending grouped by day."
)]
struct Cli {
    /// Directory holding settings, data and the audit log
    #[arg(long, global = true, env = "EXPENSE_CARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Show recent ledger changes
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show or change configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    });

    let paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };
    debug!(base_dir = %paths.base_dir().display(), "Resolved paths");

    let mut settings = Settings::load_or_create(&paths)?;
    let audit = AuditLog::new(paths.audit_log());

    match cli.command {
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&audit, limit, &settings.currency_symbol)?;
        }
        Some(Commands::Config(args)) => {
            handle_config_command(&paths, &mut settings, args)?;
        }
        command => {
            let cmd = match command {
                Some(Commands::Expense(cmd)) => cmd,
                _ => ExpenseCommands::Dashboard,
            };

            paths.ensure_directories()?;
            let mut store = LedgerStore::open(FileSlotStore::new(paths.data_dir()))?;
            if settings.audit_enabled {
                store = store.with_audit(audit);
            }

            handle_expense_command(&mut store, &settings, cmd, &mut TerminalConfirm)?;
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber, honoring `RUST_LOG` when set
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(format!("expense_card={},expense={}", level, level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
