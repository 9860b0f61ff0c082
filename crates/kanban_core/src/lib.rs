//! Core state engine for a single-board Kanban tool.
//! This crate is the single source of truth for board invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::board::{Board, BoardList, BoardValidationError, Card, CardId, ListId};
pub use model::seed::{SeedBoard, SeedCard, SeedList, DEFAULT_SEED, EMPTY_SEED};
pub use model::snapshot::SnapshotError;
pub use repo::board_store::{
    BoardStore, SqliteBoardStore, StoreError, StoreResult, DEFAULT_SLOT_KEY,
};
pub use service::drag::{resolve_drag, DragEnd, DragKind, DragLocation};
pub use service::mutation::{
    add_card, add_list, delete_list, move_card, remove_card, rename_card, rename_list,
    reorder_lists, Mutation, MutationResult, Rejection,
};
pub use service::session::{BoardListener, BoardSession, Commit};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
