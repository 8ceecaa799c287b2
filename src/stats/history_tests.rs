use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use super::super::test_fixtures::sample_snapshot;
use super::*;

fn entry_for(date: NaiveDate) -> HistoryEntry {
    HistoryEntry {
        date,
        total_cards: 100,
        mature_cards: 40,
        new_cards: 10,
        streak: 2,
        weekly_reviews: 50,
        weekly_time_minutes: 30,
    }
}

#[test]
fn from_snapshot_copies_key_metrics() {
    let snapshot = sample_snapshot();
    let entry = HistoryEntry::from_snapshot(&snapshot);

    assert_eq!(entry.date, snapshot.generated_date());
    assert_eq!(entry.total_cards, snapshot.cards.total);
    assert_eq!(entry.mature_cards, snapshot.cards.mature);
    assert_eq!(entry.new_cards, snapshot.cards.new);
    assert_eq!(entry.streak, snapshot.streak);
    assert_eq!(entry.weekly_reviews, snapshot.weekly_reviews);
    assert_eq!(entry.weekly_time_minutes, snapshot.weekly_time_minutes);
}

#[test]
fn upsert_appends_new_dates() {
    let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
    let mut history = History::new();

    history.upsert(entry_for(date));
    history.upsert(entry_for(date + Days::new(1)));

    assert_eq!(history.len(), 2);
}

#[test]
fn upsert_replaces_same_day_entry() {
    let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
    let mut history = History::new();

    history.upsert(entry_for(date));
    let mut rerun = entry_for(date);
    rerun.total_cards = 150;
    history.upsert(rerun);

    assert_eq!(history.len(), 1);
    assert_eq!(history.latest().unwrap().total_cards, 150);
}

#[test]
fn retention_keeps_trailing_window() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut history = History::new();
    for i in 0..400 {
        history.upsert(entry_for(start + Days::new(i)));
    }

    let removed = history.apply_retention();
    assert_eq!(removed, 400 - HISTORY_WINDOW);
    assert_eq!(history.len(), HISTORY_WINDOW);
    // The oldest entries are dropped, the newest survive.
    assert_eq!(history.entries()[0].date, start + Days::new(400 - HISTORY_WINDOW as u64));
    assert_eq!(history.latest().unwrap().date, start + Days::new(399));
}

#[test]
fn retention_noop_within_window() {
    let mut history = History::new();
    history.upsert(entry_for(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()));
    assert_eq!(history.apply_retention(), 0);
    assert_eq!(history.len(), 1);
}

#[test]
fn save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let mut history = History::new();
    history.upsert(entry_for(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()));
    history.upsert(entry_for(NaiveDate::from_ymd_opt(2026, 8, 2).unwrap()));
    history.save(&path).unwrap();

    let loaded = History::load(&path).unwrap();
    assert_eq!(loaded, history);
    assert_eq!(loaded.version(), history.version());
}

#[test]
fn load_or_default_on_missing_file() {
    let dir = TempDir::new().unwrap();
    let history = History::load_or_default(&dir.path().join("history.json"));
    assert!(history.is_empty());
}

#[test]
fn load_or_default_on_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{ not json").unwrap();

    let history = History::load_or_default(&path);
    assert!(history.is_empty());
}
