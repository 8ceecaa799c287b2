//! Snapshot persistence: `data/stats.json`, `data/heatmap.json` and the
//! rolling `data/history.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AnkiStatsError, Result};
use crate::stats::{History, HistoryEntry, StatsSnapshot};

pub const DATA_DIR: &str = "data";
pub const STATS_FILENAME: &str = "stats.json";
pub const HISTORY_FILENAME: &str = "history.json";
pub const HEATMAP_FILENAME: &str = "heatmap.json";

/// Write a file atomically: serialize to a temp sibling, then rename over
/// the target so a crashed run never leaves a half-written artifact.
///
/// # Errors
/// Returns an error if the directory cannot be created or the write fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, bytes)?;
    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

pub struct DataExporter {
    data_dir: PathBuf,
}

impl DataExporter {
    #[must_use]
    pub fn new(repo_root: &Path) -> Self {
        Self {
            data_dir: repo_root.join(DATA_DIR),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write the full snapshot to `stats.json`.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn export_snapshot(&self, snapshot: &StatsSnapshot) -> Result<PathBuf> {
        let path = self.data_dir.join(STATS_FILENAME);
        let json = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&path, json.as_bytes())?;
        Ok(path)
    }

    /// Write the heatmap bucket list to `heatmap.json` for standalone
    /// consumption by the chart stage.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn export_heatmap(&self, snapshot: &StatsSnapshot) -> Result<PathBuf> {
        let path = self.data_dir.join(HEATMAP_FILENAME);
        let json = serde_json::to_string_pretty(&snapshot.heatmap)?;
        write_atomic(&path, json.as_bytes())?;
        Ok(path)
    }

    /// Record the snapshot's key metrics in the rolling history file.
    ///
    /// Same-day reruns overwrite the day's entry; the file keeps a
    /// 365-entry trailing window.
    ///
    /// # Errors
    /// Returns an error if the history file cannot be written.
    pub fn export_history(&self, snapshot: &StatsSnapshot) -> Result<PathBuf> {
        let path = self.data_dir.join(HISTORY_FILENAME);
        let mut history = History::load_or_default(&path);
        history.upsert(HistoryEntry::from_snapshot(snapshot));
        history.apply_retention();
        history.save(&path)?;
        Ok(path)
    }

    /// Export all three data files.
    ///
    /// # Errors
    /// Returns the first write failure.
    pub fn export_all(&self, snapshot: &StatsSnapshot) -> Result<()> {
        self.export_snapshot(snapshot)?;
        self.export_history(snapshot)?;
        self.export_heatmap(snapshot)?;
        Ok(())
    }

    /// Load a previously exported snapshot for a later pipeline stage.
    ///
    /// # Errors
    /// `MissingData` if `stats.json` has not been exported yet.
    pub fn load_snapshot(&self) -> Result<StatsSnapshot> {
        let path = self.data_dir.join(STATS_FILENAME);
        if !path.exists() {
            return Err(AnkiStatsError::MissingData { path });
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
