//! Statistics data model.
//!
//! Everything here serializes through serde so a snapshot written to disk
//! reads back identically on a later pipeline stage.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Card counts by spaced-repetition state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardCounts {
    pub total: u64,
    pub new: u64,
    pub learning: u64,
    pub mature: u64,
    pub suspended: u64,
}

impl CardCounts {
    /// Cards that are neither suspended nor buried.
    #[must_use]
    pub const fn active(&self) -> u64 {
        self.total.saturating_sub(self.suspended)
    }

    /// Mature cards as a whole percentage of active cards.
    #[must_use]
    pub const fn mastery_percent(&self) -> u64 {
        let active = self.active();
        if active == 0 {
            0
        } else {
            self.mature * 100 / active
        }
    }
}

/// One deck with derived card counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckStats {
    pub id: String,
    /// Display name, `::`-joined hierarchy.
    pub name: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub mature: u64,
    #[serde(default)]
    pub new: u64,
}

impl DeckStats {
    #[must_use]
    pub const fn named(id: String, name: String) -> Self {
        Self {
            id,
            name,
            total: 0,
            mature: 0,
            new: 0,
        }
    }

    /// Last segment of the hierarchical name.
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        leaf_of(&self.name)
    }
}

/// Ranked review count for one deck over a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckReviewCount {
    pub id: String,
    pub name: String,
    pub reviews: u64,
}

impl DeckReviewCount {
    /// Last segment of the hierarchical name.
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        leaf_of(&self.name)
    }
}

/// One heatmap grid cell: a calendar day with its review count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: u32,
    /// Day of week, Monday = 0.
    pub weekday: u8,
    /// Week column counted from the grid start.
    pub week: u32,
}

/// A full statistics snapshot, computed fresh on each run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsSnapshot {
    pub generated_at: DateTime<Local>,
    pub cards: CardCounts,
    pub decks: IndexMap<String, DeckStats>,
    pub daily_reviews: BTreeMap<NaiveDate, u32>,
    pub daily_time_minutes: BTreeMap<NaiveDate, u64>,
    pub streak: u32,
    pub weekly_reviews: u64,
    pub weekly_time_minutes: u64,
    /// Decks ranked by reviews over the past 7 days.
    pub deck_reviews_week: Vec<DeckReviewCount>,
    /// Decks ranked by reviews over the past 30 days.
    pub deck_reviews_month: Vec<DeckReviewCount>,
    pub heatmap: Vec<HeatmapCell>,
}

impl StatsSnapshot {
    /// Calendar date the snapshot was generated on.
    #[must_use]
    pub fn generated_date(&self) -> NaiveDate {
        self.generated_at.date_naive()
    }

    /// Decks holding at least one card, largest first.
    #[must_use]
    pub fn decks_by_size(&self) -> Vec<&DeckStats> {
        let mut decks: Vec<&DeckStats> =
            self.decks.values().filter(|d| d.total > 0).collect();
        decks.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
        decks
    }
}

fn leaf_of(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
