use std::fs;
use std::path::Path;

use chrono::{Duration, Local};
use rusqlite::{Connection, params};
use tempfile::TempDir;

use crate::error::AnkiStatsError;

use super::*;

/// Minimal collection schema covering everything the reader touches.
fn create_collection(path: &Path) -> Connection {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE cards (
            id INTEGER PRIMARY KEY,
            did INTEGER NOT NULL,
            type INTEGER NOT NULL,
            queue INTEGER NOT NULL
         );
         CREATE TABLE revlog (
            id INTEGER PRIMARY KEY,
            cid INTEGER NOT NULL,
            ease INTEGER NOT NULL,
            ivl INTEGER NOT NULL,
            time INTEGER NOT NULL,
            type INTEGER NOT NULL
         );
         CREATE TABLE decks (id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
    )
    .unwrap();
    conn
}

fn insert_card(conn: &Connection, id: i64, did: i64, card_type: i64, queue: i64) {
    conn.execute(
        "INSERT INTO cards (id, did, type, queue) VALUES (?1, ?2, ?3, ?4)",
        params![id, did, card_type, queue],
    )
    .unwrap();
}

fn insert_review(conn: &Connection, id_ms: i64, cid: i64, time_ms: i64) {
    conn.execute(
        "INSERT INTO revlog (id, cid, ease, ivl, time, type) VALUES (?1, ?2, 3, 1, ?3, 0)",
        params![id_ms, cid, time_ms],
    )
    .unwrap();
}

/// Millisecond revlog id for `days` days ago, offset to keep ids unique.
fn review_id(days: i64, offset: i64) -> i64 {
    (Local::now() - Duration::days(days)).timestamp_millis() + offset
}

#[test]
fn card_counts_by_state() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("collection.anki2");
    let conn = create_collection(&db);

    insert_card(&conn, 1, 1, 0, 0); // new
    insert_card(&conn, 2, 1, 1, 1); // learning
    insert_card(&conn, 3, 1, 3, 3); // relearning counts as learning
    insert_card(&conn, 4, 1, 2, 2); // mature
    insert_card(&conn, 5, 1, 2, -1); // mature but suspended
    drop(conn);

    let reader = AnkiReader::open(&db).unwrap();
    let counts = reader.card_counts().unwrap();

    assert_eq!(counts.total, 5);
    assert_eq!(counts.new, 1);
    assert_eq!(counts.learning, 2);
    assert_eq!(counts.mature, 2);
    assert_eq!(counts.suspended, 1);
}

#[test]
fn empty_collection_counts_are_zero() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("collection.anki2");
    drop(create_collection(&db));

    let reader = AnkiReader::open(&db).unwrap();
    let counts = reader.card_counts().unwrap();
    assert_eq!(counts, CardCounts::default());
    assert!(reader.daily_review_counts(365).unwrap().is_empty());
    assert_eq!(reader.total_review_time_ms(7).unwrap(), 0);
}

#[test]
fn decks_from_modern_schema() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("collection.anki2");
    let conn = create_collection(&db);

    conn.execute(
        "INSERT INTO decks (id, name) VALUES (1, ?1), (2, 'Geography')",
        params![format!("Japanese{}Vocab", '\x1f')],
    )
    .unwrap();
    insert_card(&conn, 1, 1, 2, 2);
    insert_card(&conn, 2, 1, 0, 0);
    insert_card(&conn, 3, 2, 2, 2);
    drop(conn);

    let reader = AnkiReader::open(&db).unwrap();
    let decks = reader.decks().unwrap();

    assert_eq!(decks.len(), 2);
    // Sorted by display name: Geography before Japanese::Vocab
    let names: Vec<&str> = decks.values().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Geography", "Japanese::Vocab"]);

    let vocab = &decks["1"];
    assert_eq!(vocab.total, 2);
    assert_eq!(vocab.mature, 1);
    assert_eq!(vocab.new, 1);
    assert_eq!(vocab.leaf_name(), "Vocab");
}

#[test]
fn decks_from_legacy_json_blob() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("collection.anki2");
    let conn = Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE cards (
            id INTEGER PRIMARY KEY,
            did INTEGER NOT NULL,
            type INTEGER NOT NULL,
            queue INTEGER NOT NULL
         );
         CREATE TABLE revlog (
            id INTEGER PRIMARY KEY,
            cid INTEGER NOT NULL,
            ease INTEGER NOT NULL,
            ivl INTEGER NOT NULL,
            time INTEGER NOT NULL,
            type INTEGER NOT NULL
         );
         CREATE TABLE col (decks TEXT NOT NULL);",
    )
    .unwrap();
    conn.execute(
        "INSERT INTO col (decks) VALUES (?1)",
        params![r#"{"1": {"name": "Default"}, "2": {"name": "History::Modern"}}"#],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO cards (id, did, type, queue) VALUES (1, 2, 2, 2)",
        [],
    )
    .unwrap();
    drop(conn);

    let reader = AnkiReader::open(&db).unwrap();
    let decks = reader.decks().unwrap();

    assert_eq!(decks.len(), 2);
    assert_eq!(decks["2"].name, "History::Modern");
    assert_eq!(decks["2"].total, 1);
    assert_eq!(decks["2"].mature, 1);
    assert_eq!(decks["1"].name, "Default");
    assert_eq!(decks["1"].total, 0);
}

#[test]
fn daily_review_counts_group_by_day() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("collection.anki2");
    let conn = create_collection(&db);

    insert_review(&conn, review_id(0, 0), 1, 5_000);
    insert_review(&conn, review_id(0, 1), 1, 5_000);
    insert_review(&conn, review_id(0, 2), 1, 5_000);
    insert_review(&conn, review_id(2, 0), 1, 5_000);
    insert_review(&conn, review_id(2, 1), 1, 5_000);
    drop(conn);

    let reader = AnkiReader::open(&db).unwrap();
    let daily = reader.daily_review_counts(365).unwrap();

    let total: u64 = daily.values().map(|&c| u64::from(c)).sum();
    assert_eq!(total, 5);
    assert_eq!(daily.len(), 2);
    // The most recent bucket holds today's three reviews.
    assert_eq!(*daily.values().next_back().unwrap(), 3);
}

#[test]
fn cutoff_excludes_old_reviews() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("collection.anki2");
    let conn = create_collection(&db);

    insert_review(&conn, review_id(0, 0), 1, 5_000);
    insert_review(&conn, review_id(400, 0), 1, 5_000);
    drop(conn);

    let reader = AnkiReader::open(&db).unwrap();
    let daily = reader.daily_review_counts(365).unwrap();
    let total: u64 = daily.values().map(|&c| u64::from(c)).sum();
    assert_eq!(total, 1);
}

#[test]
fn deck_review_counts_busiest_first() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("collection.anki2");
    let conn = create_collection(&db);

    conn.execute(
        "INSERT INTO decks (id, name) VALUES (1, 'A'), (2, 'B')",
        [],
    )
    .unwrap();
    insert_card(&conn, 1, 1, 2, 2);
    insert_card(&conn, 2, 2, 2, 2);
    insert_review(&conn, review_id(0, 0), 2, 5_000);
    insert_review(&conn, review_id(0, 1), 2, 5_000);
    insert_review(&conn, review_id(1, 0), 1, 5_000);
    drop(conn);

    let reader = AnkiReader::open(&db).unwrap();
    let counts = reader.deck_review_counts(7).unwrap();

    assert_eq!(counts, vec![("2".to_string(), 2), ("1".to_string(), 1)]);
}

#[test]
fn review_time_sums_and_buckets() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("collection.anki2");
    let conn = create_collection(&db);

    insert_review(&conn, review_id(0, 0), 1, 120_000);
    insert_review(&conn, review_id(0, 1), 1, 60_000);
    drop(conn);

    let reader = AnkiReader::open(&db).unwrap();
    assert_eq!(reader.total_review_time_ms(7).unwrap(), 180_000);

    let minutes = reader.daily_review_minutes(365).unwrap();
    assert_eq!(*minutes.values().next_back().unwrap(), 3);
}

#[test]
fn open_missing_db_errors() {
    let err = AnkiReader::open(Path::new("/no/such/collection.anki2")).unwrap_err();
    assert!(matches!(err, AnkiStatsError::DatabaseNotFound { .. }));
}

#[test]
fn reader_leaves_no_sidecar_files() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("collection.anki2");
    let conn = create_collection(&db);
    insert_review(&conn, review_id(0, 0), 1, 5_000);
    drop(conn);

    let reader = AnkiReader::open(&db).unwrap();
    let _ = reader.card_counts().unwrap();
    let _ = reader.daily_review_counts(30).unwrap();
    drop(reader);

    let entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["collection.anki2".to_string()]);
}
