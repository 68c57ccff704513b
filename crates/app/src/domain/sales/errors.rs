//! Sales service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// SQLite result code for a database file that cannot be opened.
const SQLITE_CANTOPEN: &str = "14";

#[derive(Debug, Error)]
pub enum SalesServiceError {
    /// The store is unreachable, has no `sales` table, or holds no records.
    #[error("sales data unavailable: {0}; run `tally init` to create sample data")]
    DataUnavailable(String),

    /// A stored row violates a record invariant or cannot be decoded.
    #[error("invalid sales data: {0}")]
    InvalidData(String),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SalesServiceError {
    fn from(error: Error) -> Self {
        match &error {
            Error::Io(_) | Error::Configuration(_) | Error::PoolTimedOut | Error::PoolClosed => {
                return Self::DataUnavailable(error.to_string());
            }
            Error::ColumnDecode { .. } | Error::Decode(_) | Error::Encode(_) => {
                return Self::InvalidData(error.to_string());
            }
            _ => {}
        }

        if error.as_database_error().is_some_and(is_missing_store) {
            return Self::DataUnavailable(error.to_string());
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => {
                Self::InvalidData(error.to_string())
            }
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

fn is_missing_store(error: &(dyn DatabaseError + 'static)) -> bool {
    let message = error.message();

    message.contains("no such table")
        || message.contains("unable to open database file")
        || error.code().as_deref() == Some(SQLITE_CANTOPEN)
}
