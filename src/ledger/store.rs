//! Ledger store
//!
//! Owns the authoritative expense list for the session and keeps a single
//! storage slot in sync with it. Every successful mutation rewrites the whole
//! list to the slot before returning.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLog};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, Expense, ExpenseDraft, ExpenseId};
use crate::storage::SlotStore;

use super::seed::seed_expenses;
use super::views::{self, DateGroup};

/// Slot key the ledger is persisted under
pub const STORAGE_KEY: &str = "daily_expense_card_data";

/// Where the initial list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// A valid ledger was read from the slot
    Persisted,
    /// The slot was missing or blank; the seed dataset was adopted and written
    Seeded,
    /// The slot held malformed data; the seed dataset replaced it
    RecoveredFromCorrupt,
}

/// The expense ledger with write-through persistence
pub struct LedgerStore<S: SlotStore> {
    slot: S,
    key: String,
    expenses: Vec<Expense>,
    source: LoadSource,
    dirty: bool,
    audit: Option<AuditLog>,
    /// Entries for mutations not yet written to the slot
    pending_audit: Vec<AuditEntry>,
}

impl<S: SlotStore> LedgerStore<S> {
    /// Load the ledger from the default slot key
    pub fn open(slot: S) -> ExpenseResult<Self> {
        Self::open_with_key(slot, STORAGE_KEY)
    }

    /// Load the ledger from `key`, falling back to the seed dataset
    ///
    /// Malformed persisted data never fails the load. Only a failure to read
    /// the slot at all is returned as an error. Whenever the seed is adopted
    /// it is written back; if that write fails the store opens dirty.
    pub fn open_with_key(slot: S, key: impl Into<String>) -> ExpenseResult<Self> {
        let key = key.into();
        let blob = slot.read(&key)?.filter(|blob| !blob.trim().is_empty());

        let (expenses, source) = match blob {
            Some(blob) => match parse_ledger(&blob) {
                Ok(expenses) => (expenses, LoadSource::Persisted),
                Err(reason) => {
                    warn!(key = %key, %reason, "Persisted ledger is malformed, using seed data");
                    (seed_expenses(), LoadSource::RecoveredFromCorrupt)
                }
            },
            None => (seed_expenses(), LoadSource::Seeded),
        };

        let mut store = Self {
            slot,
            key,
            expenses,
            source,
            dirty: false,
            audit: None,
            pending_audit: Vec::new(),
        };

        if source != LoadSource::Persisted {
            if let Err(e) = store.persist() {
                warn!(error = %e, "Could not persist seed data");
            }
        }

        debug!(
            count = store.expenses.len(),
            source = ?store.source,
            "Ledger loaded"
        );
        Ok(store)
    }

    /// Record every persisted mutation in the given audit log
    pub fn with_audit(mut self, log: AuditLog) -> Self {
        self.audit = Some(log);
        self
    }

    /// Add a new record built from form input
    ///
    /// Invalid input leaves the ledger untouched. If the write to storage
    /// fails the record is still kept in memory and a storage error is
    /// returned.
    pub fn add(&mut self, draft: &ExpenseDraft) -> ExpenseResult<Expense> {
        let fields = draft
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let expense = Expense::new(self.fresh_id(), fields);
        self.expenses.push(expense.clone());

        self.stage_audit(AuditEntry::for_add(&expense));
        self.persist()?;

        Ok(expense)
    }

    /// Replace the fields of an existing record, keeping its id and position
    pub fn update(&mut self, id: &ExpenseId, draft: &ExpenseDraft) -> ExpenseResult<Expense> {
        let index = self
            .position(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;

        let fields = draft
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let before = self.expenses[index].clone();
        self.expenses[index].apply(fields);
        let after = self.expenses[index].clone();

        self.stage_audit(AuditEntry::for_update(&before, &after));
        self.persist()?;

        Ok(after)
    }

    /// Remove a record unconditionally
    ///
    /// Returns the removed record, or `None` if no record has this id.
    /// Removing an unknown id is not an error and writes nothing.
    pub fn remove(&mut self, id: &ExpenseId) -> ExpenseResult<Option<Expense>> {
        let Some(index) = self.position(id) else {
            debug!(id = %id, "Remove of unknown expense ignored");
            return Ok(None);
        };

        let removed = self.expenses.remove(index);

        self.stage_audit(AuditEntry::for_remove(&removed));
        self.persist()?;

        Ok(Some(removed))
    }

    /// Retry writing the current list to storage
    pub fn flush(&mut self) -> ExpenseResult<()> {
        self.persist()
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// All records in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Sum of all amounts
    pub fn total(&self) -> Amount {
        views::total(&self.expenses)
    }

    /// Records grouped by date, most recent date first
    pub fn grouped_by_date(&self) -> Vec<DateGroup<'_>> {
        views::group_by_date(&self.expenses)
    }

    /// The `n` most recently added records, newest first
    pub fn recent_entries(&self, n: usize) -> Vec<&Expense> {
        views::recent(&self.expenses, n)
    }

    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    /// Whether in-memory state is ahead of what storage holds
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    fn position(&self, id: &ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| &e.id == id)
    }

    fn fresh_id(&self) -> ExpenseId {
        loop {
            let id = ExpenseId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) -> ExpenseResult<()> {
        let blob = serde_json::to_string_pretty(&self.expenses)?;

        match self.slot.write(&self.key, &blob) {
            Ok(()) => {
                self.dirty = false;
                debug!(count = self.expenses.len(), key = %self.key, "Ledger persisted");
                self.write_audit();
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                warn!(error = %e, "Ledger could not be persisted; keeping in-memory state");
                Err(e)
            }
        }
    }

    fn stage_audit(&mut self, entry: AuditEntry) {
        if self.audit.is_some() {
            self.pending_audit.push(entry);
        }
    }

    /// Append staged entries once the slot holds the state they describe
    fn write_audit(&mut self) {
        let Some(log) = &self.audit else {
            return;
        };

        match log.append(&self.pending_audit) {
            Ok(()) => self.pending_audit.clear(),
            Err(e) => warn!(error = %e, "Failed to write audit entries"),
        }
    }
}

/// Parse a persisted blob and check the list invariants
fn parse_ledger(blob: &str) -> Result<Vec<Expense>, String> {
    let expenses: Vec<Expense> = serde_json::from_str(blob).map_err(|e| e.to_string())?;

    let mut seen = HashSet::with_capacity(expenses.len());
    for expense in &expenses {
        expense
            .validate()
            .map_err(|e| format!("record {}: {}", expense.id, e))?;
        if !seen.insert(&expense.id) {
            return Err(format!("duplicate id {}", expense.id));
        }
    }

    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{Action, FieldChange};
    use crate::ledger::seed::SEED_TOTAL;
    use crate::storage::{FileSlotStore, MemorySlotStore};
    use tempfile::TempDir;

    fn seeded_store() -> LedgerStore<MemorySlotStore> {
        LedgerStore::open(MemorySlotStore::new()).unwrap()
    }

    fn persisted(store: &LedgerStore<MemorySlotStore>) -> Vec<Expense> {
        let blob = store.slot().get(STORAGE_KEY).unwrap();
        serde_json::from_str(blob).unwrap()
    }

    fn tea() -> ExpenseDraft {
        ExpenseDraft::new("Tea", "2025-12-28", "15")
    }

    #[test]
    fn test_empty_storage_adopts_and_persists_seed() {
        let store = seeded_store();

        assert_eq!(store.load_source(), LoadSource::Seeded);
        assert_eq!(store.len(), 15);
        assert_eq!(store.total().value(), SEED_TOTAL);
        assert_eq!(persisted(&store), store.expenses());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_corrupt_storage_is_replaced_by_seed() {
        let slot = MemorySlotStore::with_value(STORAGE_KEY, "definitely not json");
        let store = LedgerStore::open(slot).unwrap();

        assert_eq!(store.load_source(), LoadSource::RecoveredFromCorrupt);
        assert_eq!(store.len(), 15);
        assert_eq!(store.total().value(), 1864.0);
        assert_eq!(persisted(&store), store.expenses());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_corrupt_storage_with_failing_writes_opens_dirty() {
        let mut slot = MemorySlotStore::with_value(STORAGE_KEY, "definitely not json");
        slot.set_fail_writes(true);

        let mut store = LedgerStore::open(slot).unwrap();

        assert_eq!(store.load_source(), LoadSource::RecoveredFromCorrupt);
        assert!(store.is_dirty());
        assert_eq!(store.slot().get(STORAGE_KEY), Some("definitely not json"));

        store.slot.set_fail_writes(false);
        store.flush().unwrap();
        assert!(!store.is_dirty());
        assert_eq!(persisted(&store), store.expenses());
    }

    #[test]
    fn test_blank_storage_counts_as_absent() {
        for blob in ["", "   \n"] {
            let store = LedgerStore::open(MemorySlotStore::with_value(STORAGE_KEY, blob)).unwrap();

            assert_eq!(store.load_source(), LoadSource::Seeded);
            assert_eq!(store.len(), 15);
            assert_eq!(persisted(&store), store.expenses());
            assert!(!store.is_dirty());
        }
    }

    #[test]
    fn test_wrong_shape_falls_back_to_seed() {
        let slot = MemorySlotStore::with_value(STORAGE_KEY, r#"{"id": "1"}"#);
        let store = LedgerStore::open(slot).unwrap();
        assert_eq!(store.load_source(), LoadSource::RecoveredFromCorrupt);
    }

    #[test]
    fn test_duplicate_ids_fall_back_to_seed() {
        let blob = r#"[
            {"id": "1", "date": "2025-12-17", "item": "Chai", "amount": 10},
            {"id": "1", "date": "2025-12-18", "item": "Bus", "amount": 20}
        ]"#;
        let store = LedgerStore::open(MemorySlotStore::with_value(STORAGE_KEY, blob)).unwrap();
        assert_eq!(store.load_source(), LoadSource::RecoveredFromCorrupt);
    }

    #[test]
    fn test_invalid_record_falls_back_to_seed() {
        let blob = r#"[{"id": "1", "date": "2025-12-17", "item": "", "amount": 10}]"#;
        let store = LedgerStore::open(MemorySlotStore::with_value(STORAGE_KEY, blob)).unwrap();
        assert_eq!(store.load_source(), LoadSource::RecoveredFromCorrupt);

        let blob = r#"[{"id": "1", "date": "2025-12-17", "item": "Chai", "amount": -10}]"#;
        let store = LedgerStore::open(MemorySlotStore::with_value(STORAGE_KEY, blob)).unwrap();
        assert_eq!(store.load_source(), LoadSource::RecoveredFromCorrupt);
    }

    #[test]
    fn test_persisted_ledger_is_adopted() {
        let blob = r#"[
            {"id": "a", "date": "2025-12-17", "item": "Chai", "amount": 10, "note": "morning"},
            {"id": "b", "date": "2025-12-18", "item": "Bus", "amount": 20.5}
        ]"#;
        let store = LedgerStore::open(MemorySlotStore::with_value(STORAGE_KEY, blob)).unwrap();

        assert_eq!(store.load_source(), LoadSource::Persisted);
        assert_eq!(store.len(), 2);
        assert_eq!(store.total().value(), 30.5);
        assert_eq!(store.expenses()[0].note.as_deref(), Some("morning"));
    }

    #[test]
    fn test_empty_array_is_an_empty_ledger() {
        let store = LedgerStore::open(MemorySlotStore::with_value(STORAGE_KEY, "[]")).unwrap();

        assert_eq!(store.load_source(), LoadSource::Persisted);
        assert!(store.is_empty());
        assert!(store.total().is_zero());
        assert!(store.grouped_by_date().is_empty());
    }

    #[test]
    fn test_add_appends_and_persists() {
        let mut store = seeded_store();

        let added = store.add(&tea()).unwrap();

        assert_eq!(store.len(), 16);
        assert_eq!(store.total().value(), 1879.0);
        assert_eq!(added.amount.value(), 15.0);
        assert_eq!(store.recent_entries(1)[0], &added);
        assert_eq!(persisted(&store), store.expenses());
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let mut store = seeded_store();
        let a = store.add(&tea()).unwrap();
        let b = store.add(&tea()).unwrap();

        assert_ne!(a.id, b.id);
        let ids: HashSet<_> = store.expenses().iter().map(|e| &e.id).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_add_invalid_is_noop() {
        let mut store = seeded_store();
        let before = persisted(&store);

        for draft in [
            ExpenseDraft::new("", "2025-12-28", "15"),
            ExpenseDraft::new("Tea", "", "15"),
            ExpenseDraft::new("Tea", "2025-12-28", "abc"),
            ExpenseDraft::new("Tea", "2025-12-28", "NaN"),
        ] {
            let err = store.add(&draft).unwrap_err();
            assert!(err.is_validation());
        }

        assert_eq!(store.len(), 15);
        assert_eq!(persisted(&store), before);
    }

    #[test]
    fn test_update_replaces_matching_record() {
        let mut store = seeded_store();
        let id = ExpenseId::from("1");

        let updated = store
            .update(&id, &ExpenseDraft::new("Ticket", "2025-12-17", "100"))
            .unwrap();

        assert_eq!(updated.amount.value(), 100.0);
        assert_eq!(store.len(), 15);
        assert_eq!(store.total().value(), 1864.0 + 35.0);
        assert_eq!(store.expenses()[0].id, id);
        assert_eq!(store.expenses()[1].item, "Rapido");
        assert_eq!(persisted(&store), store.expenses());
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = seeded_store();

        let err = store
            .update(&ExpenseId::from("nope"), &tea())
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.total().value(), 1864.0);
    }

    #[test]
    fn test_update_invalid_is_noop() {
        let mut store = seeded_store();
        let id = ExpenseId::from("1");

        let err = store
            .update(&id, &ExpenseDraft::new("Ticket", "2025-12-17", "-1"))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(store.get(&id).unwrap().amount.value(), 65.0);
    }

    #[test]
    fn test_remove_existing() {
        let mut store = seeded_store();
        let id = ExpenseId::from("10");

        let removed = store.remove(&id).unwrap().unwrap();

        assert_eq!(removed.item, "Recharge");
        assert_eq!(store.len(), 14);
        assert!(store.get(&id).is_none());
        assert!(store
            .grouped_by_date()
            .iter()
            .all(|g| g.expenses.iter().all(|e| e.id != id)));
        assert_eq!(persisted(&store), store.expenses());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = seeded_store();
        assert_eq!(store.remove(&ExpenseId::from("missing")).unwrap(), None);
        assert_eq!(store.len(), 15);
    }

    #[test]
    fn test_removing_last_record_persists_empty_list() {
        let blob = r#"[{"id": "a", "date": "2025-12-17", "item": "Chai", "amount": 10}]"#;
        let mut store = LedgerStore::open(MemorySlotStore::with_value(STORAGE_KEY, blob)).unwrap();

        store.remove(&ExpenseId::from("a")).unwrap();

        assert_eq!(store.slot().get(STORAGE_KEY).map(str::trim), Some("[]"));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = seeded_store();
        let before = persisted(&store);

        store.slot.set_fail_writes(true);

        let err = store.add(&tea()).unwrap_err();
        assert!(err.is_storage());
        assert_eq!(store.len(), 16);
        assert_eq!(store.total().value(), 1879.0);
        assert!(store.is_dirty());
        assert_eq!(persisted(&store), before);

        store.slot.set_fail_writes(false);
        store.flush().unwrap();
        assert!(!store.is_dirty());
        assert_eq!(persisted(&store).len(), 16);
    }

    #[test]
    fn test_round_trip_through_file_slot() {
        let temp_dir = TempDir::new().unwrap();

        let mut store = LedgerStore::open(FileSlotStore::new(temp_dir.path())).unwrap();
        store
            .add(&tea().with_note("with biscuits"))
            .unwrap();
        let expected = store.expenses().to_vec();

        let reopened = LedgerStore::open(FileSlotStore::new(temp_dir.path())).unwrap();
        assert_eq!(reopened.load_source(), LoadSource::Persisted);
        assert_eq!(reopened.expenses(), expected.as_slice());
        assert!(temp_dir.path().join(format!("{}.json", STORAGE_KEY)).exists());
    }

    #[test]
    fn test_serialize_and_reparse_is_identical() {
        let store = seeded_store();
        let blob = serde_json::to_string(store.expenses()).unwrap();
        assert_eq!(parse_ledger(&blob).unwrap(), store.expenses());
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        let mut store = seeded_store().with_audit(log.clone());

        let added = store.add(&tea()).unwrap();
        store
            .update(&ExpenseId::from("1"), &ExpenseDraft::new("Ticket", "2025-12-17", "100"))
            .unwrap();
        store.remove(&added.id).unwrap();

        let entries = log.entries().unwrap();
        let actions: Vec<Action> = entries.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![Action::Added, Action::Edited, Action::Deleted]);
        assert_eq!(entries[0].after.as_ref(), Some(&added));
        assert_eq!(entries[1].id, ExpenseId::from("1"));
        assert!(matches!(
            entries[1].changes.as_slice(),
            [FieldChange::Amount { from, to }] if from.value() == 65.0 && to.value() == 100.0
        ));
        assert_eq!(entries[2].before.as_ref(), Some(&added));
    }

    #[test]
    fn test_failed_validation_is_not_audited() {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        let mut store = seeded_store().with_audit(log.clone());

        let _ = store.add(&ExpenseDraft::new("", "2025-12-28", "15"));

        assert!(log.entries().unwrap().is_empty());
    }

    #[test]
    fn test_unpersisted_mutation_is_audited_only_after_flush() {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        let mut store = seeded_store().with_audit(log.clone());

        store.slot.set_fail_writes(true);
        store.add(&tea()).unwrap_err();
        assert!(log.entries().unwrap().is_empty());

        store.slot.set_fail_writes(false);
        store.flush().unwrap();
        store.flush().unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, Action::Added);
    }
}
