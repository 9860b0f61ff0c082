use kanban_core::db::{open_db, open_db_in_memory};
use kanban_core::{
    add_card, add_list, move_card, Board, BoardStore, ListId, SqliteBoardStore, StoreError,
    DEFAULT_SEED, EMPTY_SEED,
};

fn sample_board() -> Board {
    let board = DEFAULT_SEED.to_board().unwrap();
    let board = add_list(&board, "Review").unwrap();
    let review = board.list_ids().last().unwrap().clone();
    let board = add_card(&board, "Write release notes", &review).unwrap();
    move_card(&board, &ListId::from("list-1"), 0, &review, 0).unwrap()
}

#[test]
fn first_load_seeds_and_persists_default_board() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBoardStore::try_new(&conn).unwrap();
    assert!(store.read_snapshot().unwrap().is_none());

    let board = store.load(&DEFAULT_SEED).unwrap();

    assert_eq!(board, DEFAULT_SEED.to_board().unwrap());
    let raw = store.read_snapshot().unwrap().expect("seed should be persisted");
    assert_eq!(Board::from_json(&raw).unwrap(), board);
}

#[test]
fn persisted_snapshot_wins_over_fallback() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBoardStore::try_new(&conn).unwrap();
    store.load(&EMPTY_SEED).unwrap();

    let board = store.load(&DEFAULT_SEED).unwrap();
    assert_eq!(board.list_count(), 0);
}

#[test]
fn save_then_load_roundtrips_board() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBoardStore::try_new(&conn).unwrap();
    store.load(&DEFAULT_SEED).unwrap();

    let board = sample_board();
    store.save(&board).unwrap();

    assert_eq!(store.load(&EMPTY_SEED).unwrap(), board);
}

#[test]
fn serialized_board_roundtrips() {
    let board = sample_board();
    let raw = board.to_json().unwrap();
    assert_eq!(Board::from_json(&raw).unwrap(), board);
}

#[test]
fn malformed_snapshot_falls_back_to_seed_and_repairs_slot() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO board_slots (slot_key, snapshot) VALUES ('dataKanban', '{\"listIds\": [\"x\"]');",
        [],
    )
    .unwrap();
    let store = SqliteBoardStore::try_new(&conn).unwrap();

    let board = store.load(&DEFAULT_SEED).unwrap();

    assert_eq!(board, DEFAULT_SEED.to_board().unwrap());
    let raw = store.read_snapshot().unwrap().unwrap();
    assert_eq!(Board::from_json(&raw).unwrap(), board);
}

#[test]
fn snapshot_violating_invariants_is_not_loaded() {
    let conn = open_db_in_memory().unwrap();
    let duplicated = r#"{"listIds":["a","a"],"lists":{"a":{"id":"a","title":"A","cards":[]}}}"#;
    conn.execute(
        "INSERT INTO board_slots (slot_key, snapshot) VALUES ('dataKanban', ?1);",
        [duplicated],
    )
    .unwrap();
    let store = SqliteBoardStore::try_new(&conn).unwrap();

    let board = store.load(&EMPTY_SEED).unwrap();
    assert_eq!(board.list_count(), 0);
}

#[test]
fn snapshot_with_blank_titles_is_kept_as_saved() {
    let conn = open_db_in_memory().unwrap();
    let saved = r#"{"listIds":["u1"],"lists":{"u1":{"id":"u1","title":" ","cards":[{"id":"c1","title":"Important"},{"id":"c2","title":""}]}}}"#;
    conn.execute(
        "INSERT INTO board_slots (slot_key, snapshot) VALUES ('dataKanban', ?1);",
        [saved],
    )
    .unwrap();
    let store = SqliteBoardStore::try_new(&conn).unwrap();

    let board = store.load(&DEFAULT_SEED).unwrap();

    assert_eq!(board.list_ids(), &[ListId::from("u1")]);
    let list = board.list(&ListId::from("u1")).unwrap();
    assert_eq!(list.title, " ");
    assert_eq!(list.cards[0].title, "Important");
    assert_eq!(list.cards[1].title, "");
    assert_eq!(store.read_snapshot().unwrap().as_deref(), Some(saved));

    let next = add_card(&board, "Follow up", &ListId::from("u1")).unwrap();
    next.validate().unwrap();
    store.save(&next).unwrap();
    assert_eq!(store.load(&DEFAULT_SEED).unwrap(), next);
}

#[test]
fn failed_write_keeps_previous_snapshot_intact() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBoardStore::try_new(&conn).unwrap();
    let seeded = store.load(&DEFAULT_SEED).unwrap();
    let before = store.read_snapshot().unwrap();

    conn.execute_batch(
        "CREATE TRIGGER reject_board_writes
         BEFORE UPDATE ON board_slots
         BEGIN
             SELECT RAISE(ABORT, 'storage quota exceeded');
         END;",
    )
    .unwrap();

    let err = store.save(&sample_board()).unwrap_err();
    assert!(matches!(err, StoreError::Db(_)));
    assert!(err.to_string().contains("quota"));
    assert_eq!(store.read_snapshot().unwrap(), before);
    assert_eq!(store.load(&EMPTY_SEED).unwrap(), seeded);
}

#[test]
fn file_backed_board_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kanban.db");
    let board = sample_board();

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteBoardStore::try_new(&conn).unwrap();
        store.load(&DEFAULT_SEED).unwrap();
        store.save(&board).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteBoardStore::try_new(&conn).unwrap();
    assert_eq!(store.load(&EMPTY_SEED).unwrap(), board);
}
