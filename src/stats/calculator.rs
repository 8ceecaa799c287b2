//! Derived statistics: streaks, weekly totals, heatmap buckets and deck
//! rankings.
//!
//! The date-dependent computations take `today` explicitly so tests can
//! pin the clock; the collector resolves it once per run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Days, Local, NaiveDate};
use indexmap::IndexMap;

use crate::error::Result;
use crate::reader::AnkiReader;
use crate::stats::{DeckReviewCount, DeckStats, HeatmapCell, StatsSnapshot};

/// Days of review history pulled into a snapshot.
const HISTORY_DAYS: u32 = 365;

/// Weeks covered by the heatmap bucket list.
const HEATMAP_WEEKS: u64 = 52;

pub struct StatsCalculator {
    db_path: PathBuf,
}

impl StatsCalculator {
    #[must_use]
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
        }
    }

    /// Read the collection and compute a full snapshot.
    ///
    /// The connection lives only for the duration of this call.
    ///
    /// # Errors
    /// Propagates reader failures (missing or locked database).
    pub fn collect(&self) -> Result<StatsSnapshot> {
        let reader = AnkiReader::open(&self.db_path)?;

        let cards = reader.card_counts()?;
        let decks = reader.decks()?;
        let daily_reviews = reader.daily_review_counts(HISTORY_DAYS)?;
        let daily_time_minutes = reader.daily_review_minutes(HISTORY_DAYS)?;
        let weekly_time_ms = reader.total_review_time_ms(7)?;
        let week_counts = reader.deck_review_counts(7)?;
        let month_counts = reader.deck_review_counts(30)?;
        drop(reader);

        let generated_at = Local::now();
        let today = generated_at.date_naive();

        Ok(StatsSnapshot {
            generated_at,
            cards,
            streak: streak(&daily_reviews, today),
            weekly_reviews: weekly_total(&daily_reviews, today),
            weekly_time_minutes: weekly_time_ms / 60_000,
            heatmap: heatmap_cells(&daily_reviews, today),
            deck_reviews_week: rank_decks(&decks, &week_counts),
            deck_reviews_month: rank_decks(&decks, &month_counts),
            decks,
            daily_reviews,
            daily_time_minutes,
        })
    }
}

/// Current study streak: consecutive calendar days with at least one
/// review, counted backward from today, or from yesterday when today has
/// no reviews yet.
#[must_use]
pub fn streak(daily_reviews: &BTreeMap<NaiveDate, u32>, today: NaiveDate) -> u32 {
    let yesterday = today - Days::new(1);
    let anchor = if daily_reviews.contains_key(&today) {
        today
    } else if daily_reviews.contains_key(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    let mut current = anchor;
    while daily_reviews.contains_key(&current) {
        streak += 1;
        current = current - Days::new(1);
    }

    streak
}

/// Total reviews over the 7 most recent calendar days (today included);
/// missing dates count as zero.
#[must_use]
pub fn weekly_total(daily_reviews: &BTreeMap<NaiveDate, u32>, today: NaiveDate) -> u64 {
    (0..7)
        .map(|i| {
            let day = today - Days::new(i);
            u64::from(daily_reviews.get(&day).copied().unwrap_or(0))
        })
        .sum()
}

/// Heatmap buckets for the 52-week window.
///
/// The grid starts on the Monday 52 weeks before the current week and
/// covers every calendar day through today, so the bucket sum equals the
/// daily-review sum over that range.
#[must_use]
pub fn heatmap_cells(
    daily_reviews: &BTreeMap<NaiveDate, u32>,
    today: NaiveDate,
) -> Vec<HeatmapCell> {
    let weekday = u64::from(today.weekday().num_days_from_monday());
    let start = today - Days::new(weekday + HEATMAP_WEEKS * 7);

    let mut cells = Vec::new();
    let mut current = start;
    while current <= today {
        let offset = (current - start).num_days();
        cells.push(HeatmapCell {
            date: current,
            count: daily_reviews.get(&current).copied().unwrap_or(0),
            weekday: u8::try_from(current.weekday().num_days_from_monday()).unwrap_or(0),
            week: u32::try_from(offset / 7).unwrap_or(0),
        });
        current = current + Days::new(1);
    }

    cells
}

/// Join ranked per-deck review counts with deck display names.
#[must_use]
pub fn rank_decks(
    decks: &IndexMap<String, DeckStats>,
    counts: &[(String, u64)],
) -> Vec<DeckReviewCount> {
    counts
        .iter()
        .map(|(id, reviews)| DeckReviewCount {
            id: id.clone(),
            name: decks
                .get(id)
                .map_or_else(|| format!("Deck {id}"), |d| d.name.clone()),
            reviews: *reviews,
        })
        .collect()
}

#[cfg(test)]
#[path = "calculator_tests.rs"]
mod tests;
