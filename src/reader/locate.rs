//! Anki collection discovery.
//!
//! Resolution order: explicit path (CLI/config), `ANKI_DB_PATH`
//! environment variable, then platform auto-detection. The platform base
//! directory follows Anki's own conventions: `~/Library/Application
//! Support/Anki2` on macOS, `%APPDATA%\Anki2` on Windows and
//! `~/.local/share/Anki2` elsewhere.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{AnkiStatsError, Result};

pub const COLLECTION_FILENAME: &str = "collection.anki2";

pub const DB_PATH_ENV: &str = "ANKI_DB_PATH";

/// Profile-directory names that never contain a collection.
const NON_PROFILE_DIRS: &[&str] = &["addons21", "logs"];

/// The Anki base directory for the current platform.
#[must_use]
pub fn anki_base_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.data_dir().join("Anki2"))
}

/// Resolve the collection database path.
///
/// # Errors
/// Returns `DatabaseNotFound` when an explicit path (flag, config or
/// environment) does not exist, and `ProfileNotFound` when auto-detection
/// finds no profile directory containing a collection.
pub fn resolve_db_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return require_exists(path);
    }

    if let Some(env_path) = env::var_os(DB_PATH_ENV) {
        return require_exists(Path::new(&env_path));
    }

    let base = anki_base_dir().ok_or_else(|| AnkiStatsError::ProfileNotFound {
        base: PathBuf::from("<no home directory>"),
    })?;

    detect_profile_db(&base)
}

fn require_exists(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(AnkiStatsError::DatabaseNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Scan `base` for profile directories holding a collection file.
///
/// Hidden directories and Anki's own non-profile directories are
/// skipped. Candidates are sorted by name so detection is deterministic;
/// the first match wins.
pub fn detect_profile_db(base: &Path) -> Result<PathBuf> {
    if !base.exists() {
        return Err(AnkiStatsError::ProfileNotFound {
            base: base.to_path_buf(),
        });
    }

    let mut profiles: Vec<PathBuf> = fs::read_dir(base)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && is_profile_dir(path))
        .collect();
    profiles.sort();

    profiles
        .first()
        .map(|profile| profile.join(COLLECTION_FILENAME))
        .ok_or_else(|| AnkiStatsError::ProfileNotFound {
            base: base.to_path_buf(),
        })
}

fn is_profile_dir(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    !name.starts_with('.')
        && !NON_PROFILE_DIRS.contains(&name)
        && path.join(COLLECTION_FILENAME).is_file()
}

#[cfg(test)]
#[path = "locate_tests.rs"]
mod tests;
