use sqlx::sqlite::SqliteQueryResult;

use crate::repository::StorageError;

/// Maps driver errors, keeping constraint violations distinguishable.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db)
            if db.is_foreign_key_violation() || db.is_unique_violation() =>
        {
            StorageError::Conflict(db.message().to_owned())
        }
        _ => StorageError::Connection(e.to_string()),
    }
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

/// Row id generated by an `INSERT`.
pub(crate) fn inserted_id(field: &'static str, res: &SqliteQueryResult) -> Result<u64, StorageError> {
    i64_to_u64(field, res.last_insert_rowid())
}
