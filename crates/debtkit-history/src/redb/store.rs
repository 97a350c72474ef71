//! RedbHistoryStore implementation.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition, WriteTransaction};
use uuid::Uuid;

use debtkit_core::CalculationKind;

use crate::adapter::HistoryStore;
use crate::error::HistoryResult;
use crate::record::CalculationRecord;

// Records keyed by insertion sequence, plus an id -> sequence index
const RECORDS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("records");
const IDS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("record_ids");

/// Redb-backed history store.
///
/// Records are stored as JSON under a monotonically increasing sequence
/// number, so iteration order is insertion order.
///
/// # Example
///
/// ```rust,no_run
/// use debtkit_history::{HistoryStore, RedbHistoryStore};
///
/// let store = RedbHistoryStore::open("./history.redb").unwrap();
/// assert_eq!(store.backend_name(), "redb");
/// ```
pub struct RedbHistoryStore {
    db: Arc<Database>,
}

impl RedbHistoryStore {
    /// Opens or creates a history file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> HistoryResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.initialize_tables()?;
        Ok(store)
    }

    fn initialize_tables(&self) -> HistoryResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
            let _ = write_txn.open_table(IDS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn insert(write_txn: &WriteTransaction, record: &CalculationRecord) -> HistoryResult<()> {
        let data = serde_json::to_vec(record)?;
        let id = record.id.to_string();

        let mut records = write_txn.open_table(RECORDS_TABLE)?;
        let seq = records.last()?.map_or(1, |(key, _)| key.value() + 1);
        records.insert(seq, data.as_slice())?;

        let mut ids = write_txn.open_table(IDS_TABLE)?;
        ids.insert(id.as_str(), seq)?;
        Ok(())
    }

    /// Drops the oldest records until at most `capacity` remain.
    fn evict_oldest(write_txn: &WriteTransaction, capacity: usize) -> HistoryResult<usize> {
        let mut records = write_txn.open_table(RECORDS_TABLE)?;
        let mut ids = write_txn.open_table(IDS_TABLE)?;

        let stored = usize::try_from(records.len()?).unwrap_or(usize::MAX);
        let excess = stored.saturating_sub(capacity);
        let mut doomed = Vec::with_capacity(excess);
        for entry in records.iter()?.take(excess) {
            let (seq, data) = entry?;
            let record: CalculationRecord = serde_json::from_slice(data.value())?;
            doomed.push((seq.value(), record.id.to_string()));
        }

        for (seq, id) in &doomed {
            records.remove(*seq)?;
            ids.remove(id.as_str())?;
        }
        Ok(doomed.len())
    }

    /// Removes the records matching `predicate` in one transaction.
    fn remove_where<F>(&self, predicate: F) -> HistoryResult<usize>
    where
        F: Fn(&CalculationRecord) -> bool,
    {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut records = write_txn.open_table(RECORDS_TABLE)?;
            let mut ids = write_txn.open_table(IDS_TABLE)?;

            let mut doomed = Vec::new();
            for entry in records.iter()? {
                let (seq, data) = entry?;
                let record: CalculationRecord = serde_json::from_slice(data.value())?;
                if predicate(&record) {
                    doomed.push((seq.value(), record.id.to_string()));
                }
            }

            for (seq, id) in &doomed {
                records.remove(*seq)?;
                ids.remove(id.as_str())?;
            }
            doomed.len()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}

impl HistoryStore for RedbHistoryStore {
    fn backend_name(&self) -> &'static str {
        "redb"
    }

    fn is_healthy(&self) -> bool {
        self.db.begin_read().is_ok()
    }

    fn append(&self, record: &CalculationRecord) -> HistoryResult<()> {
        let write_txn = self.db.begin_write()?;
        Self::insert(&write_txn, record)?;
        write_txn.commit()?;
        Ok(())
    }

    fn append_bounded(&self, record: &CalculationRecord, capacity: usize) -> HistoryResult<usize> {
        let write_txn = self.db.begin_write()?;
        Self::insert(&write_txn, record)?;
        let evicted = Self::evict_oldest(&write_txn, capacity)?;
        write_txn.commit()?;
        Ok(evicted)
    }

    fn get(&self, id: Uuid) -> HistoryResult<Option<CalculationRecord>> {
        let read_txn = self.db.begin_read()?;
        let ids = read_txn.open_table(IDS_TABLE)?;
        let Some(seq) = ids.get(id.to_string().as_str())?.map(|g| g.value()) else {
            return Ok(None);
        };

        let records = read_txn.open_table(RECORDS_TABLE)?;
        match records.get(seq)? {
            Some(data) => Ok(Some(serde_json::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    fn list(&self, kind: Option<CalculationKind>) -> HistoryResult<Vec<CalculationRecord>> {
        let read_txn = self.db.begin_read()?;
        let records = read_txn.open_table(RECORDS_TABLE)?;

        let mut results = Vec::new();
        for entry in records.iter()? {
            let (_, data) = entry?;
            let record: CalculationRecord = serde_json::from_slice(data.value())?;
            if kind.map_or(true, |k| record.kind() == k) {
                results.push(record);
            }
        }
        Ok(results)
    }

    fn delete(&self, id: Uuid) -> HistoryResult<bool> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut ids = write_txn.open_table(IDS_TABLE)?;
            let seq = ids.remove(id.to_string().as_str())?.map(|g| g.value());
            if let Some(seq) = seq {
                let mut records = write_txn.open_table(RECORDS_TABLE)?;
                records.remove(seq)?;
            }
            seq.is_some()
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    fn clear(&self, kind: Option<CalculationKind>) -> HistoryResult<usize> {
        let removed = self.remove_where(|record| kind.map_or(true, |k| record.kind() == k))?;
        log::debug!("cleared {removed} history record(s)");
        Ok(removed)
    }

    fn trim_to(&self, capacity: usize) -> HistoryResult<usize> {
        let write_txn = self.db.begin_write()?;
        let evicted = Self::evict_oldest(&write_txn, capacity)?;
        write_txn.commit()?;
        Ok(evicted)
    }

    fn len(&self) -> HistoryResult<usize> {
        let read_txn = self.db.begin_read()?;
        let records = read_txn.open_table(RECORDS_TABLE)?;
        let count = records.len()?;
        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn test_append_get_list() {
        let dir = tempdir().unwrap();
        let store = RedbHistoryStore::open(dir.path().join("history.redb")).unwrap();
        assert!(store.is_healthy());

        let first = fixtures::brake(dec!(1000000), dec!(500)).with_session("abc");
        let second = fixtures::cost(dec!(20000), dec!(5));
        store.append(&first).unwrap();
        store.append(&second).unwrap();

        let fetched = store.get(first.id).unwrap().unwrap();
        assert_eq!(fetched.id, first.id);
        assert_eq!(fetched.session_id.as_deref(), Some("abc"));
        assert_eq!(fetched.kind(), CalculationKind::DebtBrake);

        let ids: Vec<_> = store.list(None).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, [first.id, second.id]);
        assert_eq!(store.list(Some(CalculationKind::CostAnalysis)).unwrap().len(), 1);
        assert_eq!(store.get(Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn test_delete_and_clear() {
        let dir = tempdir().unwrap();
        let store = RedbHistoryStore::open(dir.path().join("history.redb")).unwrap();

        let a = fixtures::brake(dec!(1000000), dec!(500));
        let b = fixtures::cost(dec!(20000), dec!(5));
        let c = fixtures::cost(dec!(30000), dec!(6));
        for r in [&a, &b, &c] {
            store.append(r).unwrap();
        }

        assert!(store.delete(a.id).unwrap());
        assert!(!store.delete(a.id).unwrap());
        assert_eq!(store.len().unwrap(), 2);

        assert_eq!(store.clear(Some(CalculationKind::CostAnalysis)).unwrap(), 2);
        assert!(store.is_empty().unwrap());
        assert_eq!(store.get(b.id).unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.redb");
        let record = fixtures::brake(dec!(1000000), dec!(500));

        {
            let store = RedbHistoryStore::open(&path).unwrap();
            store.append(&record).unwrap();
        }

        let reopened = RedbHistoryStore::open(&path).unwrap();
        assert_eq!(reopened.len().unwrap(), 1);
        assert_eq!(reopened.list(None).unwrap()[0].id, record.id);

        // sequence continues after the existing records
        let next = fixtures::cost(dec!(1000), dec!(2));
        reopened.append(&next).unwrap();
        let ids: Vec<_> = reopened.list(None).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, [record.id, next.id]);
    }

    #[test]
    fn test_trim_to_capacity() {
        let dir = tempdir().unwrap();
        let store = RedbHistoryStore::open(dir.path().join("history.redb")).unwrap();
        let records: Vec<_> = (1..=4)
            .map(|i| fixtures::brake(dec!(1000000), rust_decimal::Decimal::from(i)))
            .collect();
        for r in &records {
            store.append(r).unwrap();
        }

        assert_eq!(store.trim_to(2).unwrap(), 2);
        let ids: Vec<_> = store.list(None).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, [records[2].id, records[3].id]);
        // index entries go with the records
        assert_eq!(store.get(records[0].id).unwrap(), None);
        assert_eq!(store.trim_to(2).unwrap(), 0);
    }

    #[test]
    fn test_append_bounded_evicts_in_one_step() {
        let dir = tempdir().unwrap();
        let store = RedbHistoryStore::open(dir.path().join("history.redb")).unwrap();
        let records: Vec<_> = (1..=3)
            .map(|i| fixtures::brake(dec!(1000000), rust_decimal::Decimal::from(i)))
            .collect();

        assert_eq!(store.append_bounded(&records[0], 2).unwrap(), 0);
        assert_eq!(store.append_bounded(&records[1], 2).unwrap(), 0);
        assert_eq!(store.append_bounded(&records[2], 2).unwrap(), 1);

        let ids: Vec<_> = store.list(None).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, [records[1].id, records[2].id]);
        assert_eq!(store.get(records[0].id).unwrap(), None);
        assert!(store.get(records[2].id).unwrap().is_some());

        // sequence keeps growing after evictions
        let next = fixtures::cost(dec!(1000), dec!(2));
        assert_eq!(store.append_bounded(&next, 2).unwrap(), 1);
        assert_eq!(store.list(None).unwrap().last().unwrap().id, next.id);
    }
}
