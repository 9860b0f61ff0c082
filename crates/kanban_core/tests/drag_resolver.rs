use kanban_core::{
    resolve_drag, Board, BoardList, Card, CardId, DragEnd, DragKind, DragLocation, ListId,
    Mutation, Rejection,
};

fn board() -> Board {
    Board::from_parts(
        vec![ListId::from("L1"), ListId::from("L2"), ListId::from("L3")],
        vec![
            BoardList::with_id(ListId::from("L1"), "Todo").with_cards(vec![
                Card::with_id(CardId::from("cardA"), "A"),
                Card::with_id(CardId::from("cardB"), "B"),
            ]),
            BoardList::with_id(ListId::from("L2"), "Doing"),
            BoardList::with_id(ListId::from("L3"), "Done"),
        ],
    )
    .unwrap()
}

fn card_drag(id: &str, from: (&str, usize), to: Option<(&str, usize)>) -> DragEnd {
    DragEnd {
        dragged_id: id.to_string(),
        kind: DragKind::Card,
        source: DragLocation::new(from.0, from.1),
        destination: to.map(|(container, index)| DragLocation::new(container, index)),
    }
}

fn list_drag(id: &str, from: usize, to: usize) -> DragEnd {
    DragEnd {
        dragged_id: id.to_string(),
        kind: DragKind::List,
        source: DragLocation::new("board", from),
        destination: Some(DragLocation::new("board", to)),
    }
}

fn apply(board: &Board, event: &DragEnd) -> Board {
    resolve_drag(board, event).unwrap().apply(board).unwrap()
}

#[test]
fn drop_outside_target_is_cancelled() {
    let event = card_drag("cardA", ("L1", 0), None);
    assert_eq!(resolve_drag(&board(), &event), Err(Rejection::DragCancelled));
}

#[test]
fn list_drag_reorders_by_index() {
    let event = list_drag("L1", 0, 2);
    assert_eq!(
        resolve_drag(&board(), &event),
        Ok(Mutation::ReorderLists {
            from_index: 0,
            to_index: 2,
        })
    );

    let next = apply(&board(), &event);
    assert_eq!(
        next.list_ids(),
        &[ListId::from("L2"), ListId::from("L3"), ListId::from("L1")]
    );
}

#[test]
fn card_drag_across_lists_moves_card() {
    let next = apply(&board(), &card_drag("cardB", ("L1", 1), Some(("L3", 0))));

    assert_eq!(next.find_card(&CardId::from("cardB")), Some((&ListId::from("L3"), 0)));
    assert_eq!(next.list(&ListId::from("L1")).unwrap().cards.len(), 1);
}

#[test]
fn card_drag_within_list_reorders() {
    let next = apply(&board(), &card_drag("cardA", ("L1", 0), Some(("L1", 1))));

    let ids: Vec<&str> = next
        .list(&ListId::from("L1"))
        .unwrap()
        .cards
        .iter()
        .map(|card| card.id.as_str())
        .collect();
    assert_eq!(ids, vec!["cardB", "cardA"]);
}

#[test]
fn dropping_card_on_its_own_position_changes_nothing() {
    let event = card_drag("cardB", ("L1", 1), Some(("L1", 1)));
    assert_eq!(resolve_drag(&board(), &event), Err(Rejection::Unchanged));
}

#[test]
fn stale_card_index_is_rejected() {
    let event = card_drag("cardA", ("L1", 1), Some(("L2", 0)));
    assert_eq!(
        resolve_drag(&board(), &event),
        Err(Rejection::StaleDrag {
            dragged_id: "cardA".to_string()
        })
    );
}

#[test]
fn card_drag_from_unknown_list_is_rejected() {
    let event = card_drag("cardA", ("gone", 0), Some(("L2", 0)));
    assert_eq!(
        resolve_drag(&board(), &event),
        Err(Rejection::ListNotFound(ListId::from("gone")))
    );
}

#[test]
fn card_drag_into_unknown_list_resolves_but_does_not_apply() {
    let board = board();
    let mutation = resolve_drag(&board, &card_drag("cardA", ("L1", 0), Some(("gone", 0)))).unwrap();
    assert_eq!(
        mutation.apply(&board),
        Err(Rejection::ListNotFound(ListId::from("gone")))
    );
}
