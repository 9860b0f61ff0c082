//! Board use-case layer.
//!
//! # Responsibility
//! - Pure transitions over the board (`mutation`).
//! - Drag completion resolution (`drag`).
//! - Session orchestration of apply, persist and notify (`session`).
//!
//! # Invariants
//! - Presentation code never mutates a board; it calls session entry points.

pub mod drag;
pub mod mutation;
pub mod session;
