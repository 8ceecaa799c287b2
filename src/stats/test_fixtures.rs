//! Shared builders for statistics test data.

use std::collections::BTreeMap;

use chrono::{Days, Local, NaiveDate, TimeZone};
use indexmap::IndexMap;

use super::{
    CardCounts, DeckReviewCount, DeckStats, StatsSnapshot, heatmap_cells, rank_decks,
};

pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
}

/// Daily counts for `days` consecutive days ending at `last`, all with
/// the given count.
pub fn consecutive_days(last: NaiveDate, days: u64, count: u32) -> BTreeMap<NaiveDate, u32> {
    (0..days).map(|i| (last - Days::new(i), count)).collect()
}

pub fn sample_decks() -> IndexMap<String, DeckStats> {
    let mut decks = IndexMap::new();
    decks.insert(
        "1".to_string(),
        DeckStats {
            id: "1".to_string(),
            name: "Japanese::Vocab".to_string(),
            total: 800,
            mature: 500,
            new: 100,
        },
    );
    decks.insert(
        "2".to_string(),
        DeckStats {
            id: "2".to_string(),
            name: "Japanese::Kanji".to_string(),
            total: 300,
            mature: 90,
            new: 60,
        },
    );
    decks.insert(
        "3".to_string(),
        DeckStats {
            id: "3".to_string(),
            name: "Geography".to_string(),
            total: 100,
            mature: 10,
            new: 50,
        },
    );
    decks
}

pub fn sample_snapshot() -> StatsSnapshot {
    let today = fixed_date();
    let daily_reviews = consecutive_days(today, 5, 20);
    let daily_time_minutes: BTreeMap<NaiveDate, u64> =
        daily_reviews.keys().map(|d| (*d, 15)).collect();
    let decks = sample_decks();
    let counts = vec![("1".to_string(), 90_u64), ("2".to_string(), 40_u64)];

    let generated_at = Local
        .with_ymd_and_hms(2026, 8, 7, 12, 30, 0)
        .single()
        .unwrap();

    StatsSnapshot {
        generated_at,
        cards: CardCounts {
            total: 1200,
            new: 210,
            learning: 140,
            mature: 600,
            suspended: 50,
        },
        streak: 5,
        weekly_reviews: 100,
        weekly_time_minutes: 75,
        heatmap: heatmap_cells(&daily_reviews, today),
        deck_reviews_week: rank_decks(&decks, &counts),
        deck_reviews_month: rank_decks(&decks, &counts),
        decks,
        daily_reviews,
        daily_time_minutes,
    }
}

pub fn empty_ranking() -> Vec<DeckReviewCount> {
    Vec::new()
}
