//! Expense model
//!
//! An expense is a dated spending entry with a label, an amount and an
//! optional note. `ExpenseDraft` carries the raw fields of the create/edit
//! form and validates them into `ExpenseFields`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::{Amount, AmountParseError};
use super::ids::ExpenseId;

/// Date format used for record dates, both on the wire and in form input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Calendar date of the spending
    pub date: NaiveDate,

    /// Short label, never empty
    pub item: String,

    /// Spent amount
    pub amount: Amount,

    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Expense {
    /// Build a record from validated fields
    pub fn new(id: ExpenseId, fields: ExpenseFields) -> Self {
        Self {
            id,
            date: fields.date,
            item: fields.item,
            amount: fields.amount,
            note: fields.note,
        }
    }

    /// Replace every editable field, keeping the id
    pub fn apply(&mut self, fields: ExpenseFields) {
        self.date = fields.date;
        self.item = fields.item;
        self.amount = fields.amount;
        self.note = fields.note;
    }

    /// Check the invariants of a stored record
    ///
    /// Amounts are checked when they are built or deserialized.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.id.as_str().is_empty() {
            return Err(ExpenseValidationError::EmptyId);
        }
        if self.item.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyItem);
        }
        Ok(())
    }

    /// Prefill a form with this record's values
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            item: self.item.clone(),
            date: self.date.format(DATE_FORMAT).to_string(),
            amount: self.amount.value().to_string(),
            note: self.note.clone(),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format(DATE_FORMAT),
            self.item,
            self.amount
        )
    }
}

/// Validated, normalized expense fields
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    pub date: NaiveDate,
    pub item: String,
    pub amount: Amount,
    pub note: Option<String>,
}

/// Raw create/edit form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub item: String,
    pub date: String,
    pub amount: String,
    pub note: Option<String>,
}

impl ExpenseDraft {
    pub fn new(
        item: impl Into<String>,
        date: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            date: date.into(),
            amount: amount.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Validate the raw input
    ///
    /// The item is trimmed and must be non-empty, the date must be a
    /// `YYYY-MM-DD` calendar date, and the amount must parse to a finite,
    /// non-negative number. A blank note becomes `None`.
    pub fn validate(&self) -> Result<ExpenseFields, ExpenseValidationError> {
        let item = self.item.trim();
        if item.is_empty() {
            return Err(ExpenseValidationError::EmptyItem);
        }

        let date_str = self.date.trim();
        if date_str.is_empty() {
            return Err(ExpenseValidationError::EmptyDate);
        }
        let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
            .map_err(|_| ExpenseValidationError::InvalidDate(date_str.to_string()))?;

        let amount =
            Amount::parse(&self.amount).map_err(ExpenseValidationError::InvalidAmount)?;

        let note = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(ExpenseFields {
            date,
            item: item.to_string(),
            amount,
            note,
        })
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    EmptyId,
    EmptyItem,
    EmptyDate,
    InvalidDate(String),
    InvalidAmount(AmountParseError),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Expense id cannot be empty"),
            Self::EmptyItem => write!(f, "Item is required"),
            Self::EmptyDate => write!(f, "Date is required"),
            Self::InvalidDate(s) => write!(f, "Invalid date '{}'. Use YYYY-MM-DD", s),
            Self::InvalidAmount(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expense {
        let fields = ExpenseDraft::new("Ticket", "2025-12-17", "65")
            .validate()
            .unwrap();
        Expense::new(ExpenseId::from("1"), fields)
    }

    #[test]
    fn test_draft_validation() {
        let fields = ExpenseDraft::new("  Tea ", "2025-12-28", "15")
            .with_note("with biscuits")
            .validate()
            .unwrap();

        assert_eq!(fields.item, "Tea");
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2025, 12, 28).unwrap());
        assert_eq!(fields.amount.value(), 15.0);
        assert_eq!(fields.note.as_deref(), Some("with biscuits"));
    }

    #[test]
    fn test_blank_note_becomes_none() {
        let fields = ExpenseDraft::new("Tea", "2025-12-28", "15")
            .with_note("   ")
            .validate()
            .unwrap();
        assert_eq!(fields.note, None);
    }

    #[test]
    fn test_draft_rejects_empty_item() {
        let err = ExpenseDraft::new("  ", "2025-12-28", "15")
            .validate()
            .unwrap_err();
        assert_eq!(err, ExpenseValidationError::EmptyItem);
    }

    #[test]
    fn test_draft_rejects_bad_date() {
        assert_eq!(
            ExpenseDraft::new("Tea", "", "15").validate().unwrap_err(),
            ExpenseValidationError::EmptyDate
        );
        assert!(matches!(
            ExpenseDraft::new("Tea", "28/12/2025", "15").validate(),
            Err(ExpenseValidationError::InvalidDate(_))
        ));
        assert!(matches!(
            ExpenseDraft::new("Tea", "2025-02-30", "15").validate(),
            Err(ExpenseValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_draft_rejects_bad_amount() {
        assert!(matches!(
            ExpenseDraft::new("Tea", "2025-12-28", "fifteen").validate(),
            Err(ExpenseValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            ExpenseDraft::new("Tea", "2025-12-28", "NaN").validate(),
            Err(ExpenseValidationError::InvalidAmount(
                AmountParseError::NotFinite
            ))
        ));
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut expense = sample();
        let fields = ExpenseDraft::new("Bus ticket", "2025-12-18", "100")
            .validate()
            .unwrap();
        expense.apply(fields);

        assert_eq!(expense.id.as_str(), "1");
        assert_eq!(expense.item, "Bus ticket");
        assert_eq!(expense.amount.value(), 100.0);
    }

    #[test]
    fn test_to_draft_round_trips() {
        let expense = sample();
        let fields = expense.to_draft().validate().unwrap();
        assert_eq!(Expense::new(expense.id.clone(), fields), expense);
    }

    #[test]
    fn test_wire_format() {
        let expense = sample();
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["date"], "2025-12-17");
        assert_eq!(json["item"], "Ticket");
        assert_eq!(json["amount"], 65.0);
        assert!(json.get("note").is_none());

        let parsed: Expense = serde_json::from_str(
            r#"{"id":"9","date":"2025-12-17","item":"Roti","amount":30,"note":"lunch"}"#,
        )
        .unwrap();
        assert_eq!(parsed.amount.value(), 30.0);
        assert_eq!(parsed.note.as_deref(), Some("lunch"));
    }

    #[test]
    fn test_validate_stored_record() {
        let mut expense = sample();
        assert!(expense.validate().is_ok());

        expense.item = String::new();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyItem));
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "2025-12-17 Ticket 65");
    }
}
