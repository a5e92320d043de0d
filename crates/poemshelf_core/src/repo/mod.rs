//! Store contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define the read capabilities the listing and catalog services consume.
//! - Keep SQL and row decoding behind the store boundary.
//!
//! # Invariants
//! - Store APIs never write; the catalog is maintained externally.
//! - Rows that cannot be mapped to the typed model are reported as
//!   `StoreError::InvalidData` instead of being skipped.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_store;
pub mod store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store reads and row decoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
    /// Connection schema lacks a table the store queries.
    MissingRequiredTable(&'static str),
    /// A previous holder of the connection panicked mid-query.
    LockPoisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid catalog data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "catalog schema is missing table `{table}`")
            }
            Self::LockPoisoned => write!(f, "catalog connection lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::MissingRequiredTable(_) | Self::LockPoisoned => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
