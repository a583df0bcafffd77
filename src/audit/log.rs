//! Append-only audit log file
//!
//! Entries are stored one JSON object per line, oldest first.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};

use super::entry::AuditEntry;

/// The audit log at a fixed path
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `entries` in order, creating the file if needed
    pub fn append(&self, entries: &[AuditEntry]) -> ExpenseResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for entry in entries {
            serde_json::to_writer(&mut writer, entry)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Every entry, oldest first; a missing file is an empty log
    pub fn entries(&self) -> ExpenseResult<Vec<AuditEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::Deserializer::from_reader(BufReader::new(file))
            .into_iter::<AuditEntry>()
            .map(|entry| {
                entry.map_err(|e| {
                    ExpenseError::Storage(format!(
                        "Audit log {} is unreadable: {}",
                        self.path.display(),
                        e
                    ))
                })
            })
            .collect()
    }

    /// The last `count` entries, oldest first
    pub fn latest(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let mut entries = self.entries()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}
