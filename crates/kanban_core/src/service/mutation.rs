//! Pure board transitions.
//!
//! # Responsibility
//! - Turn one user request plus the current board into the next board.
//! - Reject invalid requests without touching any state.
//!
//! # Invariants
//! - Inputs are never modified; each transition returns a new board.
//! - Only lists a transition actually touches are copied, the rest stay shared
//!   with the previous snapshot.
//! - Titles are stored exactly as given; blank or whitespace-only titles are
//!   rejected.
//! - Out-of-range indices are rejected, except `move_card`'s destination
//!   index, which is clamped to the resulting length.

use crate::model::board::{Board, BoardList, Card, ListId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reason a request produced no state change.
///
/// Rejections are idempotent no-ops, not failures: the board and its
/// persisted snapshot stay exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Title is empty or whitespace-only.
    BlankTitle,
    /// Target list does not exist.
    ListNotFound(ListId),
    /// Card index is outside the list's card sequence.
    CardIndexOutOfRange {
        list_id: ListId,
        index: usize,
        len: usize,
    },
    /// List index is outside the display order.
    ListIndexOutOfRange { index: usize, len: usize },
    /// Request would leave the board identical.
    Unchanged,
    /// Drop landed outside any valid target.
    DragCancelled,
    /// Dragged item no longer sits at the reported source position.
    StaleDrag { dragged_id: String },
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::CardIndexOutOfRange {
                list_id,
                index,
                len,
            } => write!(
                f,
                "card index {index} out of range for list {list_id} with {len} card(s)"
            ),
            Self::ListIndexOutOfRange { index, len } => {
                write!(f, "list index {index} out of range for {len} list(s)")
            }
            Self::Unchanged => write!(f, "request leaves the board unchanged"),
            Self::DragCancelled => write!(f, "drag ended outside any drop target"),
            Self::StaleDrag { dragged_id } => {
                write!(f, "dragged item {dragged_id} is not at the reported source position")
            }
        }
    }
}

impl Error for Rejection {}

pub type MutationResult = Result<Board, Rejection>;

/// One engine operation with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    AddCard {
        title: String,
        list_id: ListId,
    },
    RemoveCard {
        index: usize,
        list_id: ListId,
    },
    RenameCard {
        title: String,
        index: usize,
        list_id: ListId,
    },
    AddList {
        title: String,
    },
    RenameList {
        title: String,
        list_id: ListId,
    },
    DeleteList {
        list_id: ListId,
    },
    ReorderLists {
        from_index: usize,
        to_index: usize,
    },
    MoveCard {
        source_list_id: ListId,
        source_index: usize,
        dest_list_id: ListId,
        dest_index: usize,
    },
}

impl Mutation {
    /// Applies this operation to `board`.
    pub fn apply(&self, board: &Board) -> MutationResult {
        match self {
            Self::AddCard { title, list_id } => add_card(board, title, list_id),
            Self::RemoveCard { index, list_id } => remove_card(board, *index, list_id),
            Self::RenameCard {
                title,
                index,
                list_id,
            } => rename_card(board, title, *index, list_id),
            Self::AddList { title } => add_list(board, title),
            Self::RenameList { title, list_id } => rename_list(board, title, list_id),
            Self::DeleteList { list_id } => delete_list(board, list_id),
            Self::ReorderLists {
                from_index,
                to_index,
            } => reorder_lists(board, *from_index, *to_index),
            Self::MoveCard {
                source_list_id,
                source_index,
                dest_list_id,
                dest_index,
            } => move_card(
                board,
                source_list_id,
                *source_index,
                dest_list_id,
                *dest_index,
            ),
        }
    }

    /// Stable operation name for log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddCard { .. } => "add_card",
            Self::RemoveCard { .. } => "remove_card",
            Self::RenameCard { .. } => "rename_card",
            Self::AddList { .. } => "add_list",
            Self::RenameList { .. } => "rename_list",
            Self::DeleteList { .. } => "delete_list",
            Self::ReorderLists { .. } => "reorder_lists",
            Self::MoveCard { .. } => "move_card",
        }
    }
}

/// Appends a card with a fresh id to the end of `list_id`.
pub fn add_card(board: &Board, title: &str, list_id: &ListId) -> MutationResult {
    let title = accepted_title(title)?;
    let mut next = board.clone();
    writable_list(&mut next, list_id)?.cards.push(Card::new(title));
    Ok(next)
}

/// Removes the card at `index` from `list_id`.
pub fn remove_card(board: &Board, index: usize, list_id: &ListId) -> MutationResult {
    ensure_card_index(board, list_id, index)?;
    let mut next = board.clone();
    writable_list(&mut next, list_id)?.cards.remove(index);
    Ok(next)
}

/// Sets the title of the card at `index` in `list_id`.
pub fn rename_card(board: &Board, title: &str, index: usize, list_id: &ListId) -> MutationResult {
    let title = accepted_title(title)?;
    ensure_card_index(board, list_id, index)?;
    let mut next = board.clone();
    writable_list(&mut next, list_id)?.cards[index].title = title;
    Ok(next)
}

/// Appends an empty list with a fresh id to the end of the display order.
pub fn add_list(board: &Board, title: &str) -> MutationResult {
    let title = accepted_title(title)?;
    let mut next = board.clone();
    next.push_list(BoardList::new(title));
    Ok(next)
}

pub fn rename_list(board: &Board, title: &str, list_id: &ListId) -> MutationResult {
    let title = accepted_title(title)?;
    let mut next = board.clone();
    writable_list(&mut next, list_id)?.title = title;
    Ok(next)
}

/// Removes a list together with every card it owns.
pub fn delete_list(board: &Board, list_id: &ListId) -> MutationResult {
    let mut next = board.clone();
    next.remove_list(list_id)
        .ok_or_else(|| Rejection::ListNotFound(list_id.clone()))?;
    Ok(next)
}

/// Moves the list at `from_index` to `to_index`, shifting the others.
pub fn reorder_lists(board: &Board, from_index: usize, to_index: usize) -> MutationResult {
    let len = board.list_ids.len();
    for index in [from_index, to_index] {
        if index >= len {
            return Err(Rejection::ListIndexOutOfRange { index, len });
        }
    }
    if from_index == to_index {
        return Err(Rejection::Unchanged);
    }

    let mut next = board.clone();
    let moved = next.list_ids.remove(from_index);
    next.list_ids.insert(to_index, moved);
    Ok(next)
}

/// Moves one card between positions, within a list or across lists.
///
/// `dest_index` is clamped to the destination length after the card has been
/// taken out of its source.
pub fn move_card(
    board: &Board,
    source_list_id: &ListId,
    source_index: usize,
    dest_list_id: &ListId,
    dest_index: usize,
) -> MutationResult {
    let source_len = ensure_card_index(board, source_list_id, source_index)?;
    let dest_len = board
        .list(dest_list_id)
        .map(|list| list.cards.len())
        .ok_or_else(|| Rejection::ListNotFound(dest_list_id.clone()))?;

    if source_list_id == dest_list_id {
        let target = dest_index.min(source_len - 1);
        if target == source_index {
            return Err(Rejection::Unchanged);
        }
        let mut next = board.clone();
        let cards = &mut writable_list(&mut next, source_list_id)?.cards;
        let card = cards.remove(source_index);
        cards.insert(target, card);
        return Ok(next);
    }

    let mut next = board.clone();
    let card = writable_list(&mut next, source_list_id)?
        .cards
        .remove(source_index);
    let target = dest_index.min(dest_len);
    writable_list(&mut next, dest_list_id)?
        .cards
        .insert(target, card);
    Ok(next)
}

fn accepted_title(value: &str) -> Result<String, Rejection> {
    if value.trim().is_empty() {
        return Err(Rejection::BlankTitle);
    }
    Ok(value.to_string())
}

/// Returns the card count of `list_id` when `index` addresses one of its cards.
fn ensure_card_index(board: &Board, list_id: &ListId, index: usize) -> Result<usize, Rejection> {
    let len = board
        .list(list_id)
        .map(|list| list.cards.len())
        .ok_or_else(|| Rejection::ListNotFound(list_id.clone()))?;
    if index >= len {
        return Err(Rejection::CardIndexOutOfRange {
            list_id: list_id.clone(),
            index,
            len,
        });
    }
    Ok(len)
}

fn writable_list<'a>(
    board: &'a mut Board,
    list_id: &ListId,
) -> Result<&'a mut BoardList, Rejection> {
    board
        .list_mut(list_id)
        .ok_or_else(|| Rejection::ListNotFound(list_id.clone()))
}
