//! JSON snapshot encoding for persisted boards.
//!
//! # Invariants
//! - Field names match the stored layout: `listIds` plus a `lists` map keyed
//!   by list id, each entry carrying `id`, `title` and ordered `cards`.
//! - Decoding rejects snapshots that break board structure; titles are
//!   taken as stored.

use crate::model::board::{Board, BoardList, BoardValidationError, ListId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredBoardRef<'a> {
    list_ids: &'a [ListId],
    lists: BTreeMap<&'a ListId, &'a BoardList>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBoard {
    list_ids: Vec<ListId>,
    lists: BTreeMap<ListId, BoardList>,
}

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    Invalid(BoardValidationError),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "snapshot is not valid board json: {err}"),
            Self::Invalid(err) => write!(f, "snapshot violates board invariants: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<BoardValidationError> for SnapshotError {
    fn from(value: BoardValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl Board {
    /// Serializes the board into its persisted JSON form.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        let stored = StoredBoardRef {
            list_ids: &self.list_ids,
            lists: self
                .lists
                .iter()
                .map(|(id, list)| (id, list.as_ref()))
                .collect(),
        };
        Ok(serde_json::to_string(&stored)?)
    }

    /// Parses a persisted JSON snapshot and checks its structure.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let stored: StoredBoard = serde_json::from_str(raw)?;
        let mut lists = Vec::with_capacity(stored.lists.len());
        for (key, list) in stored.lists {
            if key != list.id {
                return Err(BoardValidationError::ListKeyMismatch { key, id: list.id }.into());
            }
            lists.push(list);
        }
        Ok(Self::from_parts(stored.list_ids, lists)?)
    }
}

#[cfg(test)]
mod tests {
    use super::SnapshotError;
    use crate::model::board::{Board, BoardValidationError, ListId};
    use crate::model::seed::DEFAULT_SEED;

    #[test]
    fn snapshot_uses_stored_field_names() {
        let board = DEFAULT_SEED.to_board().expect("seed");
        let raw = board.to_json().expect("encode");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");

        assert_eq!(value["listIds"][0], "list-1");
        assert_eq!(value["lists"]["list-1"]["title"], "Todo");
        assert_eq!(value["lists"]["list-1"]["cards"][0]["id"], "card-1");
        assert_eq!(value["lists"]["list-2"]["cards"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn decode_accepts_snapshot_written_by_other_tools() {
        let raw = r#"{
            "listIds": ["b", "a"],
            "lists": {
                "a": {"id": "a", "title": "Later", "cards": []},
                "b": {"id": "b", "title": "Now", "cards": [{"id": "c1", "title": "Ship"}]}
            }
        }"#;
        let board = Board::from_json(raw).expect("decode");
        assert_eq!(board.list_ids(), &[ListId::from("b"), ListId::from("a")]);
        assert_eq!(board.card_count(), 1);
    }

    #[test]
    fn decode_rejects_key_that_disagrees_with_list_id() {
        let raw = r#"{"listIds": ["a"], "lists": {"a": {"id": "b", "title": "X", "cards": []}}}"#;
        let err = Board::from_json(raw).expect_err("mismatch must fail");
        assert!(matches!(
            err,
            SnapshotError::Invalid(BoardValidationError::ListKeyMismatch { .. })
        ));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = Board::from_json("{not json").expect_err("garbage must fail");
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn decode_keeps_blank_titles_written_by_other_tools() {
        let raw = r#"{"listIds": ["a"], "lists": {"a": {"id": "a", "title": "", "cards": [{"id": "c1", "title": "  "}]}}}"#;
        let board = Board::from_json(raw).expect("blank titles are not structural");
        let list = board.list(&ListId::from("a")).expect("list a");
        assert_eq!(list.title, "");
        assert_eq!(list.cards[0].title, "  ");
    }
}
