use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export::write_atomic;
use crate::stats::StatsSnapshot;

const HISTORY_VERSION: u32 = 1;

/// Trailing window kept on disk, one entry per calendar day.
pub const HISTORY_WINDOW: usize = 365;

/// One snapshot of the key metrics, keyed by calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub total_cards: u64,
    pub mature_cards: u64,
    pub new_cards: u64,
    pub streak: u32,
    pub weekly_reviews: u64,
    pub weekly_time_minutes: u64,
}

impl HistoryEntry {
    #[must_use]
    pub fn from_snapshot(snapshot: &StatsSnapshot) -> Self {
        Self {
            date: snapshot.generated_date(),
            total_cards: snapshot.cards.total,
            mature_cards: snapshot.cards.mature,
            new_cards: snapshot.cards.new,
            streak: snapshot.streak,
            weekly_reviews: snapshot.weekly_reviews,
            weekly_time_minutes: snapshot.weekly_time_minutes,
        }
    }
}

/// Rolling history of daily metric snapshots.
///
/// File format:
/// ```json
/// {
///   "version": 1,
///   "entries": [
///     { "date": "2026-08-07", "total_cards": 1200, ... }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct History {
    version: u32,
    entries: Vec<HistoryEntry>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            version: HISTORY_VERSION,
            entries: Vec::new(),
        }
    }

    /// Load history from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load history if the file exists, otherwise start empty. A corrupt
    /// file also starts empty rather than aborting the run.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save to a JSON file using an atomic temp-file + rename write.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())?;
        Ok(())
    }

    /// Record an entry; a same-day rerun replaces the existing entry for
    /// that date instead of appending.
    pub fn upsert(&mut self, entry: HistoryEntry) {
        if let Some(last) = self.entries.last_mut()
            && last.date == entry.date
        {
            *last = entry;
            return;
        }
        self.entries.push(entry);
    }

    /// Trim to the trailing window, dropping the oldest entries.
    ///
    /// Returns the number of entries removed.
    pub fn apply_retention(&mut self) -> usize {
        if self.entries.len() <= HISTORY_WINDOW {
            return 0;
        }
        let excess = self.entries.len() - HISTORY_WINDOW;
        self.entries.drain(0..excess);
        excess
    }

    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
