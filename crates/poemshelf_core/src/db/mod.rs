//! Catalog database bootstrap.
//!
//! The catalog is one SQLite file holding poets, poems, the theme and tag
//! vocabularies and the two poem/facet link tables. Everything above this
//! module reads through [`crate::repo::sqlite_store::SqlitePoemStore`], which
//! expects a connection produced here.
//!
//! # Invariants
//! - Connections leave this module with the catalog schema fully migrated.
//! - A catalog written by a newer poemshelf is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or migrate a catalog database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file's `user_version` is ahead of the migrations compiled in.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// True when the catalog needs a newer poemshelf build rather than repair.
    pub fn is_schema_too_new(&self) -> bool {
        matches!(self, Self::SchemaTooNew { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "catalog database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "catalog schema version {found} was written by a newer poemshelf (this build reads up to {supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
