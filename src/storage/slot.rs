//! Key-value slots holding serialized ledger blobs
//!
//! A slot is one named cell of durable storage. The ledger keeps its whole
//! record list in a single slot and overwrites it on every mutation.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{ExpenseError, ExpenseResult};

use super::file_io::{read_if_exists, write_atomic};

/// Durable storage addressed by string keys
pub trait SlotStore {
    /// Read the value stored under `key`, `None` if the slot is empty
    fn read(&self, key: &str) -> ExpenseResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn write(&mut self, key: &str, value: &str) -> ExpenseResult<()>;
}

/// Slots stored as `<key>.json` files in a directory
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, key: &str) -> ExpenseResult<Option<String>> {
        read_if_exists(self.slot_path(key))
    }

    fn write(&mut self, key: &str, value: &str) -> ExpenseResult<()> {
        write_atomic(self.slot_path(key), value)
    }
}

/// In-memory slots, used for embedding and tests
///
/// Writes can be made to fail to emulate a full or read-only device.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: HashMap<String, String>,
    fail_writes: bool,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one slot already filled
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.into(), value.into());
        store
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> ExpenseResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> ExpenseResult<()> {
        if self.fail_writes {
            return Err(ExpenseError::Storage(format!(
                "Quota exceeded while writing slot '{}'",
                key
            )));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
