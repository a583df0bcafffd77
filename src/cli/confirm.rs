//! Confirmation prompts
//!
//! Destructive commands ask before acting. On a terminal the prompt is a
//! `dialoguer` yes/no question defaulting to "no"; with redirected input a
//! single line is read from stdin instead.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::{ExpenseError, ExpenseResult};

/// Something that can ask the user a yes/no question
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> ExpenseResult<bool>;
}

/// Asks on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> ExpenseResult<bool> {
        if io::stdin().is_terminal() {
            return dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .map_err(|e| ExpenseError::Io(format!("Confirmation prompt failed: {}", e)));
        }

        eprint!("{} [y/N] ", prompt);
        io::stderr().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

/// Answers every prompt the same way, for `--force` and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, _prompt: &str) -> ExpenseResult<bool> {
        Ok(self.0)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
