//! History error types.

use thiserror::Error;

/// History operation result type.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// History error types.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Database error from the underlying storage engine.
    #[error("Database error: {0}")]
    Database(String),

    /// Transaction error.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// A lock guarding in-memory state was poisoned.
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<redb::Error> for HistoryError {
    fn from(err: redb::Error) -> Self {
        HistoryError::Database(err.to_string())
    }
}

impl From<redb::DatabaseError> for HistoryError {
    fn from(err: redb::DatabaseError) -> Self {
        HistoryError::Database(err.to_string())
    }
}

impl From<redb::TableError> for HistoryError {
    fn from(err: redb::TableError) -> Self {
        HistoryError::Database(err.to_string())
    }
}

impl From<redb::TransactionError> for HistoryError {
    fn from(err: redb::TransactionError) -> Self {
        HistoryError::Transaction(err.to_string())
    }
}

impl From<redb::CommitError> for HistoryError {
    fn from(err: redb::CommitError) -> Self {
        HistoryError::Transaction(err.to_string())
    }
}

impl From<redb::StorageError> for HistoryError {
    fn from(err: redb::StorageError) -> Self {
        HistoryError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            HistoryError::Deserialization(err.to_string())
        } else {
            HistoryError::Serialization(err.to_string())
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for HistoryError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        HistoryError::LockPoisoned(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_map_to_deserialization() {
        let err: HistoryError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, HistoryError::Deserialization(_)));
    }
}
