//! In-memory history store.
//!
//! Data is not persisted across restarts.

use std::sync::RwLock;

use uuid::Uuid;

use debtkit_core::CalculationKind;

use crate::adapter::HistoryStore;
use crate::error::HistoryResult;
use crate::record::CalculationRecord;

/// In-memory history store.
///
/// Thread-safe through a `RwLock`; records are held in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<CalculationRecord>>,
}

impl InMemoryHistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn is_healthy(&self) -> bool {
        !self.records.is_poisoned()
    }

    fn append(&self, record: &CalculationRecord) -> HistoryResult<()> {
        self.records.write()?.push(record.clone());
        Ok(())
    }

    fn get(&self, id: Uuid) -> HistoryResult<Option<CalculationRecord>> {
        Ok(self.records.read()?.iter().find(|r| r.id == id).cloned())
    }

    fn list(&self, kind: Option<CalculationKind>) -> HistoryResult<Vec<CalculationRecord>> {
        Ok(self
            .records
            .read()?
            .iter()
            .filter(|r| kind.map_or(true, |k| r.kind() == k))
            .cloned()
            .collect())
    }

    fn delete(&self, id: Uuid) -> HistoryResult<bool> {
        let mut records = self.records.write()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    fn clear(&self, kind: Option<CalculationKind>) -> HistoryResult<usize> {
        let mut records = self.records.write()?;
        let before = records.len();
        match kind {
            Some(kind) => records.retain(|r| r.kind() != kind),
            None => records.clear(),
        }
        Ok(before - records.len())
    }

    fn len(&self) -> HistoryResult<usize> {
        Ok(self.records.read()?.len())
    }

    fn trim_to(&self, capacity: usize) -> HistoryResult<usize> {
        let mut records = self.records.write()?;
        let excess = records.len().saturating_sub(capacity);
        records.drain(..excess);
        Ok(excess)
    }

    fn append_bounded(&self, record: &CalculationRecord, capacity: usize) -> HistoryResult<usize> {
        let mut records = self.records.write()?;
        records.push(record.clone());
        let excess = records.len().saturating_sub(capacity);
        records.drain(..excess);
        Ok(excess)
    }
}
