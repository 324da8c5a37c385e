//! Centralized error handling for dbdoc operations.
//!
//! The catalog distinguishes four failure classes so callers can react
//! differently to each:
//!
//! - [`DbDocError::NotFound`]: a row whose existence the operation requires
//!   is absent (e.g. exporting a table that has no description).
//! - [`DbDocError::Conflict`]: a uniqueness violation on create.
//! - [`DbDocError::Connection`]: the backing store is unreachable or a query
//!   failed to execute.
//! - [`DbDocError::Unknown`]: anything else the backing store reports.
//!
//! "No matching row" on a lookup is *not* an error: those operations return
//! `Ok(None)` or `Ok(false)` and the caller handles the absence as a normal
//! outcome.

use std::fmt;

/// Main error type for catalog and export operations.
#[derive(Debug)]
pub enum DbDocError {
    /// A row required by the operation's contract does not exist.
    NotFound(String),

    /// Uniqueness violation on create (duplicate natural key).
    Conflict(String),

    /// Backing store unreachable or query execution failure.
    Connection(String),

    /// File system errors while writing exported documents.
    Io(std::io::Error),

    /// Anything else surfaced by the backing store.
    Unknown(String),
}

impl fmt::Display for DbDocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::Conflict(msg) => write!(f, "conflict: {msg}"),
            Self::Connection(msg) => write!(f, "database connection error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Unknown(msg) => write!(f, "database error: {msg}"),
        }
    }
}

impl std::error::Error for DbDocError {}

impl From<std::io::Error> for DbDocError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<sqlx::Error> for DbDocError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                if db.is_unique_violation() {
                    Self::Conflict(db.message().to_owned())
                } else {
                    Self::Connection(db.message().to_owned())
                }
            }
            sqlx::Error::Io(e) => Self::Connection(e.to_string()),
            e @ (sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::Tls(_)) => Self::Connection(e.to_string()),
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Result type alias for dbdoc operations.
pub type Result<T> = std::result::Result<T, DbDocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DbDocError::NotFound("table 'orders'".to_owned());
        assert_eq!(err.to_string(), "not found: table 'orders'");

        let err = DbDocError::Conflict("duplicate table name".to_owned());
        assert_eq!(err.to_string(), "conflict: duplicate table name");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "docs");
        let err: DbDocError = io.into();
        assert!(matches!(err, DbDocError::Io(_)));
    }
}
