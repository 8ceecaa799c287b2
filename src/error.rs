use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnkiStatsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Anki database not found: {path}")]
    DatabaseNotFound { path: PathBuf },

    #[error("No Anki profile with collection.anki2 found under {base}")]
    ProfileNotFound { base: PathBuf },

    #[error("Anki database is locked: {path} (close Anki before running sync)")]
    DatabaseLocked { path: PathBuf },

    #[error("Database query failed: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Missing data file: {path} (run `anki-stats export` first)")]
    MissingData { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),
}

pub type Result<T> = std::result::Result<T, AnkiStatsError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
