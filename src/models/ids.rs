//! Expense identifiers
//!
//! Ids are opaque strings. Records created by the app get a UUID v4, while
//! persisted data (including the seed dataset) may carry any non-empty string
//! such as `"1"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique identifier of an expense record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create a new random ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ExpenseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ExpenseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
