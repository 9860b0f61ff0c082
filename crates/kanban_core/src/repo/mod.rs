//! Persistence boundary for board snapshots.
//!
//! # Responsibility
//! - Define the load/save contract the session depends on.
//! - Keep SQL details out of the engine and session.
//!
//! # Invariants
//! - Stores return semantic errors in addition to SQLite transport errors.

pub mod board_store;
