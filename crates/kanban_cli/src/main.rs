//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `kanban_core` linkage without any presentation layer attached.
//! - Print the seeded board so storage bootstrap can be eyeballed quickly.

use kanban_core::db::open_db_in_memory;
use kanban_core::{BoardSession, SqliteBoardStore, DEFAULT_SEED};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("kanban_core ping={}", kanban_core::ping());
    println!("kanban_core version={}", kanban_core::core_version());

    let conn = open_db_in_memory()?;
    let store = SqliteBoardStore::try_new(&conn)?;
    let session = BoardSession::open(store, &DEFAULT_SEED)?;
    for list in session.board().lists_in_order() {
        println!("list id={} cards={} title={}", list.id, list.cards.len(), list.title);
    }
    Ok(())
}
