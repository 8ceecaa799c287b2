//! Optional `.anki-stats.toml` configuration.
//!
//! CLI flags always win over file values; `--no-config` skips loading
//! entirely.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_FILENAME: &str = ".anki-stats.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub charts: ChartsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Explicit path to collection.anki2. Overrides platform detection
    /// but not the `ANKI_DB_PATH` environment variable or `--db`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    /// Commit artifacts after a sync run.
    #[serde(default = "default_true")]
    pub commit: bool,

    /// Push after committing.
    #[serde(default)]
    pub push: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            commit: true,
            push: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartsConfig {
    /// Number of decks shown in the weekly review ranking chart.
    #[serde(default = "default_ranked_decks")]
    pub max_ranked_decks: usize,

    /// Number of decks shown in the progress-rows chart.
    #[serde(default = "default_progress_decks")]
    pub max_progress_decks: usize,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            max_ranked_decks: default_ranked_decks(),
            max_progress_decks: default_progress_decks(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_ranked_decks() -> usize {
    7
}

const fn default_progress_decks() -> usize {
    10
}

impl Config {
    /// Load configuration from `<repo_root>/.anki-stats.toml`.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(repo_root: &Path, no_config: bool) -> Result<Self> {
        if no_config {
            return Ok(Self::default());
        }

        let path = repo_root.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.charts.max_ranked_decks == 0 {
            return Err(crate::error::AnkiStatsError::Config(
                "charts.max_ranked_decks must be at least 1".to_string(),
            ));
        }
        if self.charts.max_progress_decks == 0 {
            return Err(crate::error::AnkiStatsError::Config(
                "charts.max_progress_decks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
