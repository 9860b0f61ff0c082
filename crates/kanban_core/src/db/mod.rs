//! Board database bootstrap.
//!
//! A connection is only handed to the board store once its schema is at the
//! version this build writes and the slot table exists. [`ensure_board_schema`]
//! is that gate; `open_db` runs it right after migrating.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_board_schema, SLOT_TABLE};

pub type DbResult<T> = Result<T, DbError>;

/// Failures opening or checking a board database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was migrated by a newer build; its slot layout is unknown here.
    SchemaTooNew { found: u32, supported: u32 },
    /// Connection was opened without running the board migrations.
    SchemaBehind { found: u32, expected: u32 },
    /// Version says the slot table was created, but it is gone.
    SlotTableMissing,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "board database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "board database uses schema {found}, this build only reads up to {supported}"
            ),
            Self::SchemaBehind { found, expected } => write!(
                f,
                "board database is at schema {found}; open it with open_db to reach {expected}"
            ),
            Self::SlotTableMissing => write!(f, "board database has no `{SLOT_TABLE}` table"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
