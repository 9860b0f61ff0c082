//! Readiness check for connections used by the board store.

use super::migrations::{current_version, latest_version};
use super::{DbError, DbResult};
use rusqlite::Connection;

/// Table holding one serialized board per slot key.
pub const SLOT_TABLE: &str = "board_slots";

/// Verifies `conn` is at the latest board schema and carries the slot table.
///
/// # Errors
/// - [`DbError::SchemaTooNew`] / [`DbError::SchemaBehind`] on a version
///   mismatch.
/// - [`DbError::SlotTableMissing`] when the table was dropped after migrating.
pub fn ensure_board_schema(conn: &Connection) -> DbResult<()> {
    let found = current_version(conn)?;
    let expected = latest_version();
    if found > expected {
        return Err(DbError::SchemaTooNew {
            found,
            supported: expected,
        });
    }
    if found < expected {
        return Err(DbError::SchemaBehind { found, expected });
    }

    let present: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [SLOT_TABLE],
        |row| row.get(0),
    )?;
    if !present {
        return Err(DbError::SlotTableMissing);
    }
    Ok(())
}
