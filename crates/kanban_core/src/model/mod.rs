//! Board domain model.
//!
//! # Responsibility
//! - Define the canonical board/list/card structures used by the engine.
//! - Own snapshot encoding and the built-in seed board.
//!
//! # Invariants
//! - The board is the single root of ownership for lists and cards.
//! - Every accepted transition yields a board that passes `Board::validate()`.

pub mod board;
pub mod seed;
pub mod snapshot;
