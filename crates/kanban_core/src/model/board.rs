//! Board domain model.
//!
//! # Responsibility
//! - Define the canonical board/list/card structure owned by the session.
//! - Verify structural invariants for freshly built or loaded boards.
//!
//! # Invariants
//! - `list_ids` and the keys of `lists` form a bijection.
//! - Card ids are unique across the whole board, not just per list.
//! - Ids are never blank. Titles are not part of the structural check: stored
//!   boards keep whatever titles they were saved with, and blank titles are
//!   refused where titles are written (transitions, seeds).
//! - Lists are shared between snapshots through `Arc`; a list reachable from an
//!   older snapshot is never mutated in place.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh, globally unique id.
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wraps an existing id, e.g. one read back from a snapshot.
            pub fn from_string(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(
    /// Opaque list identifier. Fresh ids are UUID v4 strings.
    ListId
);

opaque_id!(
    /// Opaque card identifier, unique board-wide.
    CardId
);

/// A titled unit of work owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
}

impl Card {
    /// Creates a card with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(CardId::new(), title)
    }

    pub fn with_id(id: CardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A named, ordered column of cards. Card position equals its index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: ListId,
    pub title: String,
    pub cards: Vec<Card>,
}

impl BoardList {
    /// Creates an empty list with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(ListId::new(), title)
    }

    pub fn with_id(id: ListId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cards: Vec::new(),
        }
    }

    /// Builder-style helper used by seeds and tests.
    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Returns the position of `card_id` in this list.
    pub fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == card_id)
    }
}

/// Root of ownership for all lists and cards.
///
/// Cloning a board is cheap: list bodies are shared behind `Arc` and only the
/// lists a transition touches get copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub(crate) list_ids: Vec<ListId>,
    pub(crate) lists: BTreeMap<ListId, Arc<BoardList>>,
}

impl Board {
    /// Creates a board with no lists.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assembles a board from display order plus list bodies.
    ///
    /// # Errors
    /// - Returns the first invariant violation found.
    pub fn from_parts(
        list_ids: Vec<ListId>,
        lists: Vec<BoardList>,
    ) -> Result<Self, BoardValidationError> {
        let mut by_id = BTreeMap::new();
        for list in lists {
            let id = list.id.clone();
            if by_id.insert(id.clone(), Arc::new(list)).is_some() {
                return Err(BoardValidationError::DuplicateListId(id));
            }
        }

        let board = Self {
            list_ids,
            lists: by_id,
        };
        board.validate()?;
        Ok(board)
    }

    /// List ids in display order.
    pub fn list_ids(&self) -> &[ListId] {
        &self.list_ids
    }

    pub fn list(&self, list_id: &ListId) -> Option<&BoardList> {
        self.lists.get(list_id).map(Arc::as_ref)
    }

    /// Iterates lists in display order.
    pub fn lists_in_order(&self) -> impl Iterator<Item = &BoardList> + '_ {
        self.list_ids
            .iter()
            .filter_map(|list_id| self.lists.get(list_id).map(Arc::as_ref))
    }

    pub fn list_count(&self) -> usize {
        self.list_ids.len()
    }

    pub fn card_count(&self) -> usize {
        self.lists.values().map(|list| list.cards.len()).sum()
    }

    /// Locates a card by id, returning its owning list and position.
    pub fn find_card(&self, card_id: &CardId) -> Option<(&ListId, usize)> {
        self.lists_in_order()
            .find_map(|list| list.position_of(card_id).map(|index| (&list.id, index)))
    }

    pub fn contains_card(&self, card_id: &CardId) -> bool {
        self.find_card(card_id).is_some()
    }

    /// Returns whether two boards share the same list body allocation.
    ///
    /// Used to observe structural sharing between snapshots.
    pub fn shares_list_with(&self, other: &Board, list_id: &ListId) -> bool {
        match (self.lists.get(list_id), other.lists.get(list_id)) {
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Checks every structural invariant of the board.
    ///
    /// Covers ids, order/body bijection and card uniqueness. Titles are left
    /// alone so a stored board is never discarded over its text.
    pub fn validate(&self) -> Result<(), BoardValidationError> {
        let mut seen_lists = HashSet::new();
        for list_id in &self.list_ids {
            if list_id.as_str().trim().is_empty() {
                return Err(BoardValidationError::BlankId);
            }
            if !seen_lists.insert(list_id) {
                return Err(BoardValidationError::DuplicateListId(list_id.clone()));
            }
            if !self.lists.contains_key(list_id) {
                return Err(BoardValidationError::MissingList(list_id.clone()));
            }
        }

        let mut seen_cards = HashSet::new();
        for (key, list) in &self.lists {
            if !seen_lists.contains(key) {
                return Err(BoardValidationError::OrphanList(key.clone()));
            }
            if &list.id != key {
                return Err(BoardValidationError::ListKeyMismatch {
                    key: key.clone(),
                    id: list.id.clone(),
                });
            }
            for card in &list.cards {
                if card.id.as_str().trim().is_empty() {
                    return Err(BoardValidationError::BlankId);
                }
                if !seen_cards.insert(&card.id) {
                    return Err(BoardValidationError::DuplicateCardId(card.id.clone()));
                }
            }
        }

        Ok(())
    }

    /// Returns a writable list body, copying it first if an older snapshot
    /// still references it.
    pub(crate) fn list_mut(&mut self, list_id: &ListId) -> Option<&mut BoardList> {
        self.lists.get_mut(list_id).map(Arc::make_mut)
    }

    pub(crate) fn push_list(&mut self, list: BoardList) {
        self.list_ids.push(list.id.clone());
        self.lists.insert(list.id.clone(), Arc::new(list));
    }

    pub(crate) fn remove_list(&mut self, list_id: &ListId) -> Option<Arc<BoardList>> {
        let removed = self.lists.remove(list_id)?;
        self.list_ids.retain(|id| id != list_id);
        Some(removed)
    }
}

/// Structural invariant violations detected on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardValidationError {
    /// An id is empty or whitespace-only.
    BlankId,
    /// The same list id appears twice in display order or list bodies.
    DuplicateListId(ListId),
    /// Display order references a list with no body.
    MissingList(ListId),
    /// A list body is not referenced by display order.
    OrphanList(ListId),
    /// A list body is stored under a key different from its own id.
    ListKeyMismatch { key: ListId, id: ListId },
    /// The same card id appears more than once on the board.
    DuplicateCardId(CardId),
    BlankListTitle(ListId),
    BlankCardTitle(CardId),
}

impl Display for BoardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "board ids must not be blank"),
            Self::DuplicateListId(id) => write!(f, "duplicate list id: {id}"),
            Self::MissingList(id) => write!(f, "list order references missing list: {id}"),
            Self::OrphanList(id) => write!(f, "list is not present in list order: {id}"),
            Self::ListKeyMismatch { key, id } => {
                write!(f, "list stored under key {key} carries id {id}")
            }
            Self::DuplicateCardId(id) => write!(f, "duplicate card id: {id}"),
            Self::BlankListTitle(id) => write!(f, "list title must not be blank: {id}"),
            Self::BlankCardTitle(id) => write!(f, "card title must not be blank: {id}"),
        }
    }
}

impl Error for BoardValidationError {}
