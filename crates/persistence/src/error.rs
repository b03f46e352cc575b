// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autosub::StoreError;
use autosub_domain::DomainError;

/// A stored row that does not decode into a valid domain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowDecodeError {
    /// An integer column holds a value outside its domain range.
    #[error("{column} value {value} is out of range")]
    OutOfRange {
        /// The offending column.
        column: &'static str,
        /// The stored value.
        value: i64,
    },
    /// A column holds a value the domain rejects.
    #[error("invalid {column}: {source}")]
    Invalid {
        /// The offending column.
        column: &'static str,
        /// Why the domain rejected it.
        source: DomainError,
    },
    /// A timestamp column could not be parsed.
    #[error("invalid timestamp '{value}': {message}")]
    Timestamp {
        /// The stored text.
        value: String,
        /// The parser's message.
        message: String,
    },
}

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A uniqueness or foreign key constraint rejected a write.
    ConstraintViolation(String),
    /// A stored row could not be decoded.
    CorruptRecord(RowDecodeError),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ConstraintViolation(msg) => write!(f, "Constraint violation: {msg}"),
            Self::CorruptRecord(err) => write!(f, "Corrupt record: {err}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;

        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => Self::ConstraintViolation(info.message().to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<RowDecodeError> for PersistenceError {
    fn from(err: RowDecodeError) -> Self {
        Self::CorruptRecord(err)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ConstraintViolation(msg) => Self::Conflict(msg),
            other => Self::Unavailable(other.to_string()),
        }
    }
}
