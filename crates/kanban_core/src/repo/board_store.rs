//! Board snapshot store contract and SQLite implementation.
//!
//! # Responsibility
//! - Read and write one serialized board snapshot in a named key-value slot.
//! - Fall back to an explicit seed board when no usable snapshot exists.
//!
//! # Invariants
//! - `save` replaces the slot atomically: on failure the previous snapshot is
//!   still what the next `load` sees.
//! - `load` never returns a board that fails `Board::validate()`.
//! - A seeded fallback is persisted before `load` returns it.

use crate::db::{ensure_board_schema, DbError};
use crate::model::board::{Board, BoardValidationError};
use crate::model::seed::SeedBoard;
use crate::model::snapshot::SnapshotError;
use log::{error, info, warn};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Slot key used when callers do not pick one.
pub const DEFAULT_SLOT_KEY: &str = "dataKanban";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from board store operations.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite failure, or a connection whose schema is not ready.
    Db(DbError),
    /// Board could not be encoded for persistence.
    Snapshot(SnapshotError),
    /// Fallback seed does not describe a valid board.
    InvalidSeed(BoardValidationError),
    /// Slot key is empty after trim.
    InvalidSlotKey,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::InvalidSeed(err) => write!(f, "seed board is invalid: {err}"),
            Self::InvalidSlotKey => write!(f, "board slot key must not be blank"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::InvalidSeed(err) => Some(err),
            Self::InvalidSlotKey => None,
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

impl From<SnapshotError> for StoreError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Durable load/save boundary for one board snapshot.
pub trait BoardStore {
    /// Loads the persisted board, or materializes and persists `fallback`.
    fn load(&self, fallback: &SeedBoard) -> StoreResult<Board>;
    /// Overwrites the persisted snapshot with `board`.
    fn save(&self, board: &Board) -> StoreResult<()>;
}

/// SQLite-backed board store writing into the `board_slots` table.
pub struct SqliteBoardStore<'conn> {
    conn: &'conn Connection,
    slot_key: String,
}

impl<'conn> SqliteBoardStore<'conn> {
    /// Creates a store bound to [`DEFAULT_SLOT_KEY`].
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        Self::with_slot(conn, DEFAULT_SLOT_KEY)
    }

    /// Creates a store bound to a caller-chosen slot key.
    pub fn with_slot(conn: &'conn Connection, slot_key: impl Into<String>) -> StoreResult<Self> {
        let slot_key = slot_key.into().trim().to_string();
        if slot_key.is_empty() {
            return Err(StoreError::InvalidSlotKey);
        }
        ensure_board_schema(conn)?;
        Ok(Self { conn, slot_key })
    }

    pub fn slot_key(&self) -> &str {
        self.slot_key.as_str()
    }

    /// Returns the raw persisted snapshot text, if any.
    pub fn read_snapshot(&self) -> StoreResult<Option<String>> {
        let raw = self
            .conn
            .query_row(
                "SELECT snapshot FROM board_slots WHERE slot_key = ?1;",
                [self.slot_key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(raw)
    }

    fn write_snapshot(&self, raw: &str) -> StoreResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO board_slots (slot_key, snapshot)
             VALUES (?1, ?2)
             ON CONFLICT(slot_key) DO UPDATE
             SET snapshot = excluded.snapshot,
                 updated_at = (strftime('%s', 'now') * 1000);",
            params![self.slot_key.as_str(), raw],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl BoardStore for SqliteBoardStore<'_> {
    fn load(&self, fallback: &SeedBoard) -> StoreResult<Board> {
        let started_at = Instant::now();

        if let Some(raw) = self.read_snapshot()? {
            match Board::from_json(&raw) {
                Ok(board) => {
                    info!(
                        "event=board_load module=repo status=ok source=snapshot slot={} lists={} cards={} duration_ms={}",
                        self.slot_key,
                        board.list_count(),
                        board.card_count(),
                        started_at.elapsed().as_millis()
                    );
                    return Ok(board);
                }
                Err(err) => {
                    warn!(
                        "event=board_load module=repo status=fallback slot={} reason=invalid_snapshot error={}",
                        self.slot_key, err
                    );
                }
            }
        }

        let board = fallback.to_board().map_err(StoreError::InvalidSeed)?;
        self.save(&board)?;
        info!(
            "event=board_load module=repo status=ok source=seed slot={} lists={} cards={} duration_ms={}",
            self.slot_key,
            board.list_count(),
            board.card_count(),
            started_at.elapsed().as_millis()
        );
        Ok(board)
    }

    fn save(&self, board: &Board) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = board
            .to_json()
            .map_err(StoreError::from)
            .and_then(|raw| self.write_snapshot(&raw));

        match &result {
            Ok(()) => info!(
                "event=board_save module=repo status=ok slot={} lists={} cards={} duration_ms={}",
                self.slot_key,
                board.list_count(),
                board.card_count(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=board_save module=repo status=error slot={} duration_ms={} error_code=board_save_failed error={}",
                self.slot_key,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}
