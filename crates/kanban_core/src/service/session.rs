//! Board session controller.
//!
//! # Responsibility
//! - Load the initial board (or seed it) through a [`BoardStore`].
//! - Dispatch engine transitions and drag events one at a time.
//! - Persist and publish every accepted transition.
//!
//! # Invariants
//! - Rejected requests neither replace, persist nor publish the board.
//! - Accepted requests run in order: replace in memory, persist, notify.
//! - Listeners only ever see immutable `Arc<Board>` snapshots.
//! - A transition that breaks board invariants is a bug and aborts.

use crate::model::board::{Board, ListId};
use crate::model::seed::SeedBoard;
use crate::repo::board_store::{BoardStore, StoreError, StoreResult};
use crate::service::drag::{resolve_drag, DragEnd};
use crate::service::mutation::{Mutation, Rejection};
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Callback invoked with every newly published board.
pub type BoardListener = Box<dyn FnMut(&Arc<Board>)>;

/// Outcome of one session entry point.
#[derive(Debug)]
pub enum Commit {
    /// Request was a no-op; nothing changed anywhere.
    Rejected(Rejection),
    /// New board is live and durably recorded.
    Saved,
    /// New board is live in memory, but persisting it failed. The previously
    /// stored snapshot is untouched.
    SaveFailed(StoreError),
}

impl Commit {
    /// Returns whether the in-memory board advanced.
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Holds the current board and routes every change through the engine.
pub struct BoardSession<S: BoardStore> {
    store: S,
    board: Arc<Board>,
    listeners: Vec<BoardListener>,
}

impl<S: BoardStore> BoardSession<S> {
    /// Opens a session from `store`, seeding it with `seed` when empty.
    pub fn open(store: S, seed: &SeedBoard) -> StoreResult<Self> {
        let board = store.load(seed)?;
        info!(
            "event=session_open module=service status=ok lists={} cards={}",
            board.list_count(),
            board.card_count()
        );
        Ok(Self {
            store,
            board: Arc::new(board),
            listeners: Vec::new(),
        })
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Shared read-only handle to the current board.
    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a listener notified after each accepted transition.
    pub fn subscribe(&mut self, listener: impl FnMut(&Arc<Board>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_card(&mut self, title: &str, list_id: &ListId) -> Commit {
        self.dispatch(Mutation::AddCard {
            title: title.to_string(),
            list_id: list_id.clone(),
        })
    }

    pub fn remove_card(&mut self, index: usize, list_id: &ListId) -> Commit {
        self.dispatch(Mutation::RemoveCard {
            index,
            list_id: list_id.clone(),
        })
    }

    pub fn rename_card(&mut self, title: &str, index: usize, list_id: &ListId) -> Commit {
        self.dispatch(Mutation::RenameCard {
            title: title.to_string(),
            index,
            list_id: list_id.clone(),
        })
    }

    pub fn add_list(&mut self, title: &str) -> Commit {
        self.dispatch(Mutation::AddList {
            title: title.to_string(),
        })
    }

    pub fn rename_list(&mut self, title: &str, list_id: &ListId) -> Commit {
        self.dispatch(Mutation::RenameList {
            title: title.to_string(),
            list_id: list_id.clone(),
        })
    }

    pub fn delete_list(&mut self, list_id: &ListId) -> Commit {
        self.dispatch(Mutation::DeleteList {
            list_id: list_id.clone(),
        })
    }

    pub fn reorder_lists(&mut self, from_index: usize, to_index: usize) -> Commit {
        self.dispatch(Mutation::ReorderLists {
            from_index,
            to_index,
        })
    }

    pub fn move_card(
        &mut self,
        source_list_id: &ListId,
        source_index: usize,
        dest_list_id: &ListId,
        dest_index: usize,
    ) -> Commit {
        self.dispatch(Mutation::MoveCard {
            source_list_id: source_list_id.clone(),
            source_index,
            dest_list_id: dest_list_id.clone(),
            dest_index,
        })
    }

    /// Applies a finished drag gesture, or nothing when it resolves to no-op.
    pub fn on_drag_end(&mut self, event: &DragEnd) -> Commit {
        match resolve_drag(&self.board, event) {
            Ok(mutation) => {
                debug!(
                    "event=drag_resolved module=service status=ok kind={:?} op={}",
                    event.kind,
                    mutation.name()
                );
                self.dispatch(mutation)
            }
            Err(reason) => {
                debug!(
                    "event=drag_resolved module=service status=rejected kind={:?} reason={}",
                    event.kind, reason
                );
                Commit::Rejected(reason)
            }
        }
    }

    /// Runs one mutation through apply, persist and notify.
    pub fn dispatch(&mut self, mutation: Mutation) -> Commit {
        let next = match mutation.apply(&self.board) {
            Ok(next) => next,
            Err(reason) => {
                debug!(
                    "event=mutation_rejected module=service status=rejected op={} reason={}",
                    mutation.name(),
                    reason
                );
                return Commit::Rejected(reason);
            }
        };

        if let Err(err) = next.validate() {
            error!(
                "event=invariant_violation module=service status=error op={} error={}",
                mutation.name(),
                err
            );
            panic!("board invariant violated by {}: {err}", mutation.name());
        }

        self.board = Arc::new(next);
        let commit = match self.store.save(&self.board) {
            Ok(()) => Commit::Saved,
            Err(err) => {
                warn!(
                    "event=mutation_applied module=service status=error op={} error_code=persist_failed error={}",
                    mutation.name(),
                    err
                );
                Commit::SaveFailed(err)
            }
        };
        if commit.is_saved() {
            info!(
                "event=mutation_applied module=service status=ok op={} lists={} cards={}",
                mutation.name(),
                self.board.list_count(),
                self.board.card_count()
            );
        }

        for listener in &mut self.listeners {
            listener(&self.board);
        }
        commit
    }
}
