//! Classification of driver errors into [`StoreError`].

use sqlx::error::ErrorKind;

use crate::domain::shared::StoreError;

/// Primary result codes for a lock held by another connection
/// (`SQLITE_BUSY`, `SQLITE_LOCKED`).
const LOCK_CONTENTION: [i32; 2] = [5, 6];

/// Whether an extended SQLite result code reports lock contention.
fn is_lock_contention(code: &str) -> bool {
    code.parse::<i32>()
        .is_ok_and(|extended| LOCK_CONTENTION.contains(&(extended & 0xff)))
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => Self::Integrity(db.message().to_string()),
                _ if db.code().is_some_and(|code| is_lock_contention(&code)) => {
                    Self::Connection(db.message().to_string())
                }
                _ => Self::Query(db.message().to_string()),
            },
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Connection(err.to_string()),
            sqlx::Error::ColumnNotFound(column) => Self::MissingField(column),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::Serialization(err.to_string())
            }
            other => Self::Query(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<rust_decimal::Error> for StoreError {
    fn from(err: rust_decimal::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_a_connection_error() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Connection(_)));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let err = StoreError::from(sqlx::Error::ColumnNotFound("price".to_string()));
        assert!(matches!(err, StoreError::MissingField(ref c) if c == "price"));
    }

    #[test]
    fn row_not_found_is_a_query_error() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[test]
    fn busy_and_locked_codes_are_lock_contention() {
        // SQLITE_BUSY, SQLITE_BUSY_TIMEOUT, SQLITE_LOCKED_SHAREDCACHE
        for code in ["5", "773", "262"] {
            assert!(is_lock_contention(code), "{code}");
        }
        // SQLITE_ERROR, SQLITE_CONSTRAINT_FOREIGNKEY
        for code in ["1", "787", "not a code"] {
            assert!(!is_lock_contention(code), "{code}");
        }
    }

    #[test]
    fn bad_json_is_a_serialization_error() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        assert!(matches!(
            StoreError::from(json_err),
            StoreError::Serialization(_)
        ));
    }
}
