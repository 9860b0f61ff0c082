//! Drag-and-drop completion resolver.
//!
//! Maps one finished drag gesture onto at most one [`Mutation`]. The dragged
//! item is resolved by id before any index is trusted, so a drag that started
//! against an older board is rejected instead of moving the wrong item.

use crate::model::board::{Board, CardId, ListId};
use crate::service::mutation::{Mutation, Rejection};
use serde::{Deserialize, Serialize};

/// What kind of item was dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    List,
    Card,
}

/// A position inside a drop container.
///
/// For card drags `container_id` is the owning list id; list drags use the
/// board-level container and only `index` is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub container_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container_id: impl Into<String>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// Drag completion event as reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub dragged_id: String,
    pub kind: DragKind,
    pub source: DragLocation,
    /// `None` when the item was dropped outside any valid target.
    pub destination: Option<DragLocation>,
}

/// Resolves a drag completion into the single transition it stands for.
///
/// # Errors
/// - `DragCancelled` when there is no destination.
/// - `StaleDrag` when the dragged id is not at the reported source index.
/// - `Unchanged` when a card is dropped back onto its own position.
pub fn resolve_drag(board: &Board, event: &DragEnd) -> Result<Mutation, Rejection> {
    let destination = event
        .destination
        .as_ref()
        .ok_or(Rejection::DragCancelled)?;

    match event.kind {
        DragKind::List => {
            let at_source = board.list_ids().get(event.source.index);
            if at_source.map(ListId::as_str) != Some(event.dragged_id.as_str()) {
                return Err(stale(event));
            }
            Ok(Mutation::ReorderLists {
                from_index: event.source.index,
                to_index: destination.index,
            })
        }
        DragKind::Card => {
            let source_list_id = ListId::from(event.source.container_id.as_str());
            let dragged = CardId::from(event.dragged_id.as_str());
            let found = board
                .list(&source_list_id)
                .ok_or_else(|| Rejection::ListNotFound(source_list_id.clone()))?
                .position_of(&dragged);
            if found != Some(event.source.index) {
                return Err(stale(event));
            }

            if destination.container_id == event.source.container_id
                && destination.index == event.source.index
            {
                return Err(Rejection::Unchanged);
            }

            Ok(Mutation::MoveCard {
                source_list_id,
                source_index: event.source.index,
                dest_list_id: ListId::from(destination.container_id.as_str()),
                dest_index: destination.index,
            })
        }
    }
}

fn stale(event: &DragEnd) -> Rejection {
    Rejection::StaleDrag {
        dragged_id: event.dragged_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_drag, DragEnd, DragKind, DragLocation};
    use crate::model::seed::DEFAULT_SEED;
    use crate::service::mutation::Rejection;

    #[test]
    fn drag_end_deserializes_from_presentation_payload() {
        let raw = r#"{
            "draggedId": "card-2",
            "kind": "card",
            "source": {"containerId": "list-1", "index": 1},
            "destination": null
        }"#;
        let event: DragEnd = serde_json::from_str(raw).expect("payload");
        assert_eq!(event.kind, DragKind::Card);
        assert_eq!(event.source, DragLocation::new("list-1", 1));
        assert!(event.destination.is_none());
    }

    #[test]
    fn list_drag_with_wrong_source_index_is_stale() {
        let board = DEFAULT_SEED.to_board().expect("seed");
        let event = DragEnd {
            dragged_id: "list-2".to_string(),
            kind: DragKind::List,
            source: DragLocation::new("board", 0),
            destination: Some(DragLocation::new("board", 1)),
        };
        assert_eq!(
            resolve_drag(&board, &event),
            Err(Rejection::StaleDrag {
                dragged_id: "list-2".to_string()
            })
        );
    }
}
