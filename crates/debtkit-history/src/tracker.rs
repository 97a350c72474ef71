//! Calculation tracking on top of a history store.

use std::sync::Arc;

use uuid::Uuid;

use debtkit_core::CalculationKind;

use crate::adapter::HistoryStore;
use crate::error::HistoryResult;
use crate::export::{HistoryExport, HistoryReport};
use crate::record::{Calculation, CalculationRecord};

/// Default number of calculations kept in history.
pub const DEFAULT_CAPACITY: usize = 100;

/// Default number of entries returned by [`AnalyticsTracker::recent`].
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Files calculations in a [`HistoryStore`] and analyses them.
///
/// The tracker caps the store at `capacity` records, evicting the oldest.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use debtkit_history::{AnalyticsTracker, InMemoryHistoryStore};
///
/// let tracker = AnalyticsTracker::new(Arc::new(InMemoryHistoryStore::new()));
/// assert_eq!(tracker.report().unwrap().summary.total_calculations, 0);
/// ```
#[derive(Clone)]
pub struct AnalyticsTracker {
    store: Arc<dyn HistoryStore>,
    capacity: usize,
}

impl AnalyticsTracker {
    /// Creates a tracker with the default capacity.
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self::with_capacity(store, DEFAULT_CAPACITY)
    }

    /// Creates a tracker keeping at most `capacity` records.
    pub fn with_capacity(store: Arc<dyn HistoryStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.max(1),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn HistoryStore {
        self.store.as_ref()
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Files a calculation and returns the stored record.
    pub fn track(
        &self,
        calculation: Calculation,
        session_id: Option<String>,
    ) -> HistoryResult<CalculationRecord> {
        let mut record = CalculationRecord::new(calculation);
        record.session_id = session_id;

        let evicted = self.store.append_bounded(&record, self.capacity)?;
        log::debug!(
            "tracked {} calculation {} ({} evicted)",
            record.kind(),
            record.id,
            evicted
        );
        Ok(record)
    }

    /// Newest records first, optionally of one kind.
    pub fn recent(
        &self,
        kind: Option<CalculationKind>,
        limit: usize,
    ) -> HistoryResult<Vec<CalculationRecord>> {
        let mut records = self.store.list(kind)?;
        records.reverse();
        records.truncate(limit);
        Ok(records)
    }

    /// All records, oldest first.
    pub fn records(&self) -> HistoryResult<Vec<CalculationRecord>> {
        self.store.list(None)
    }

    /// Looks up a record.
    pub fn get(&self, id: Uuid) -> HistoryResult<Option<CalculationRecord>> {
        self.store.get(id)
    }

    /// Deletes a record. Returns whether it existed.
    pub fn delete(&self, id: Uuid) -> HistoryResult<bool> {
        self.store.delete(id)
    }

    /// Clears all records, or the records of one kind.
    pub fn clear(&self, kind: Option<CalculationKind>) -> HistoryResult<usize> {
        self.store.clear(kind)
    }

    /// Insights, recommendations and summary for the current history.
    pub fn report(&self) -> HistoryResult<HistoryReport> {
        Ok(HistoryReport::from_records(&self.records()?))
    }

    /// Export document for the current history.
    pub fn export(&self) -> HistoryResult<HistoryExport> {
        Ok(HistoryExport::new(self.records()?))
    }
}

impl std::fmt::Debug for AnalyticsTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsTracker")
            .field("backend", &self.store.backend_name())
            .field("capacity", &self.capacity)
            .finish()
    }
}
