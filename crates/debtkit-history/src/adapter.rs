//! History store trait definition.

use uuid::Uuid;

use debtkit_core::CalculationKind;

use crate::error::HistoryResult;
use crate::record::CalculationRecord;

/// Storage backend for calculation history.
///
/// Records are kept in insertion order. Every backend is `Send + Sync` so a
/// single store can be shared by all request handlers.
///
/// # Example
///
/// ```rust
/// use debtkit_history::{HistoryStore, InMemoryHistoryStore};
///
/// let store = InMemoryHistoryStore::new();
/// assert!(store.is_healthy());
/// assert_eq!(store.len().unwrap(), 0);
/// ```
pub trait HistoryStore: Send + Sync {
    /// Returns the backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Checks if the store is accessible.
    fn is_healthy(&self) -> bool;

    /// Appends a record.
    fn append(&self, record: &CalculationRecord) -> HistoryResult<()>;

    /// Retrieves a record by id.
    fn get(&self, id: Uuid) -> HistoryResult<Option<CalculationRecord>>;

    /// Lists records oldest first, optionally restricted to one kind.
    fn list(&self, kind: Option<CalculationKind>) -> HistoryResult<Vec<CalculationRecord>>;

    /// Deletes a record by id. Returns whether it existed.
    fn delete(&self, id: Uuid) -> HistoryResult<bool>;

    /// Deletes every record, or every record of one kind. Returns the number
    /// removed.
    fn clear(&self, kind: Option<CalculationKind>) -> HistoryResult<usize>;

    /// Number of stored records.
    fn len(&self) -> HistoryResult<usize>;

    /// Returns true when nothing is stored.
    fn is_empty(&self) -> HistoryResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Removes the oldest records until at most `capacity` remain. Returns the
    /// number removed.
    fn trim_to(&self, capacity: usize) -> HistoryResult<usize> {
        let records = self.list(None)?;
        let excess = records.len().saturating_sub(capacity);
        for record in &records[..excess] {
            self.delete(record.id)?;
        }
        Ok(excess)
    }

    /// Appends a record, then trims to `capacity`. Returns the number of
    /// records evicted.
    fn append_bounded(&self, record: &CalculationRecord, capacity: usize) -> HistoryResult<usize> {
        self.append(record)?;
        self.trim_to(capacity)
    }
}
