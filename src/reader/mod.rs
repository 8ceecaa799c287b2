//! Read-only access to the Anki collection database.
//!
//! The connection is opened in immutable mode so a WAL collection can be
//! read while Anki is closed, and no write (not even a journal file) can
//! ever touch the reviewed database. All queries are aggregates; rows are
//! never materialized card-by-card.

pub mod locate;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDate};
use indexmap::IndexMap;
use rusqlite::{Connection, OpenFlags, params};

use crate::error::{AnkiStatsError, Result};
use crate::stats::{CardCounts, DeckStats};

pub use locate::{DB_PATH_ENV, resolve_db_path};

/// Deck name hierarchy separator used on disk by the current schema.
const DECK_NAME_SEPARATOR: char = '\x1f';

#[derive(Debug)]
pub struct AnkiReader {
    conn: Connection,
    path: PathBuf,
}

impl AnkiReader {
    /// Open the collection read-only.
    ///
    /// # Errors
    /// `DatabaseNotFound` if the path does not exist, `DatabaseLocked` if
    /// another process holds the database.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AnkiStatsError::DatabaseNotFound {
                path: path.to_path_buf(),
            });
        }

        let uri = immutable_uri(path);
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn =
            Connection::open_with_flags(&uri, flags).map_err(|e| map_locked(path, e))?;

        let reader = Self {
            conn,
            path: path.to_path_buf(),
        };

        // Probe so a locked database surfaces here, not mid-pipeline.
        reader.with_lock_mapped(|conn| {
            conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get::<_, i64>(0))
        })?;

        Ok(reader)
    }

    /// Card counts by state.
    ///
    /// Card types: 0=new, 1=learning, 2=review (mature), 3=relearning.
    /// Queue < 0 marks suspended or buried cards.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn card_counts(&self) -> Result<CardCounts> {
        self.with_lock_mapped(|conn| {
            conn.query_row(
                "SELECT
                    COUNT(*),
                    SUM(CASE WHEN type = 0 THEN 1 ELSE 0 END),
                    SUM(CASE WHEN type = 1 OR type = 3 THEN 1 ELSE 0 END),
                    SUM(CASE WHEN type = 2 THEN 1 ELSE 0 END),
                    SUM(CASE WHEN queue < 0 THEN 1 ELSE 0 END)
                 FROM cards",
                [],
                |row| {
                    Ok(CardCounts {
                        total: count_from(row.get::<_, Option<i64>>(0)?),
                        new: count_from(row.get::<_, Option<i64>>(1)?),
                        learning: count_from(row.get::<_, Option<i64>>(2)?),
                        mature: count_from(row.get::<_, Option<i64>>(3)?),
                        suspended: count_from(row.get::<_, Option<i64>>(4)?),
                    })
                },
            )
        })
    }

    /// All decks with per-deck card counts, in name order.
    ///
    /// Supports both schema shapes: the modern per-row `decks` table
    /// (hierarchy separator `\x1f`) and the legacy JSON blob in `col`.
    ///
    /// # Errors
    /// Returns an error if neither deck representation can be read.
    pub fn decks(&self) -> Result<IndexMap<String, DeckStats>> {
        let mut decks = self.with_lock_mapped(Self::deck_names)?;

        let counts: Vec<(String, u64, u64, u64)> = self.with_lock_mapped(|conn| {
            let mut stmt = conn.prepare(
                "SELECT
                    did,
                    COUNT(*),
                    SUM(CASE WHEN type = 0 THEN 1 ELSE 0 END),
                    SUM(CASE WHEN type = 2 THEN 1 ELSE 0 END)
                 FROM cards
                 GROUP BY did",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?.to_string(),
                    count_from(row.get::<_, Option<i64>>(1)?),
                    count_from(row.get::<_, Option<i64>>(2)?),
                    count_from(row.get::<_, Option<i64>>(3)?),
                ))
            })?;
            rows.collect()
        })?;

        for (deck_id, total, new, mature) in counts {
            if let Some(deck) = decks.get_mut(&deck_id) {
                deck.total = total;
                deck.new = new;
                deck.mature = mature;
            }
        }

        decks.sort_by(|_, a, _, b| a.name.cmp(&b.name));
        Ok(decks)
    }

    fn deck_names(conn: &Connection) -> rusqlite::Result<IndexMap<String, DeckStats>> {
        let mut decks = IndexMap::new();

        // Modern schema first; older collections keep decks as a JSON
        // blob inside the single-row col table.
        match conn.prepare("SELECT id, name FROM decks") {
            Ok(mut stmt) => {
                let rows = stmt.query_map([], |row| {
                    let id = row.get::<_, i64>(0)?.to_string();
                    let raw: String = row.get(1)?;
                    Ok((id, raw))
                })?;
                for row in rows {
                    let (id, raw) = row?;
                    let name = raw.replace(DECK_NAME_SEPARATOR, "::");
                    decks.insert(id.clone(), DeckStats::named(id, name));
                }
            }
            Err(_) => {
                let blob: String =
                    conn.query_row("SELECT decks FROM col", [], |row| row.get(0))?;
                let parsed: serde_json::Value =
                    serde_json::from_str(&blob).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            0,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;
                if let Some(map) = parsed.as_object() {
                    for (id, info) in map {
                        let name = info
                            .get("name")
                            .and_then(serde_json::Value::as_str)
                            .unwrap_or(id)
                            .to_string();
                        decks.insert(id.clone(), DeckStats::named(id.clone(), name));
                    }
                }
            }
        }

        Ok(decks)
    }

    /// Review counts grouped by local calendar day for the past N days.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn daily_review_counts(&self, days: u32) -> Result<BTreeMap<NaiveDate, u32>> {
        let cutoff = cutoff_ms(days);
        self.with_lock_mapped(|conn| {
            let mut stmt = conn.prepare(
                "SELECT
                    date(id/1000, 'unixepoch', 'localtime'),
                    COUNT(*)
                 FROM revlog
                 WHERE id > ?1
                 GROUP BY 1
                 ORDER BY 1",
            )?;
            let rows = stmt.query_map(params![cutoff], |row| {
                let date = parse_sql_date(&row.get::<_, String>(0)?)?;
                let count: i64 = row.get(1)?;
                Ok((date, u32::try_from(count).unwrap_or(u32::MAX)))
            })?;
            rows.collect()
        })
    }

    /// Review time in whole minutes grouped by local calendar day.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn daily_review_minutes(&self, days: u32) -> Result<BTreeMap<NaiveDate, u64>> {
        let cutoff = cutoff_ms(days);
        self.with_lock_mapped(|conn| {
            let mut stmt = conn.prepare(
                "SELECT
                    date(id/1000, 'unixepoch', 'localtime'),
                    SUM(time)
                 FROM revlog
                 WHERE id > ?1
                 GROUP BY 1
                 ORDER BY 1",
            )?;
            let rows = stmt.query_map(params![cutoff], |row| {
                let date = parse_sql_date(&row.get::<_, String>(0)?)?;
                let total_ms = count_from(row.get::<_, Option<i64>>(1)?);
                Ok((date, total_ms / 60_000))
            })?;
            rows.collect()
        })
    }

    /// Total review time in milliseconds over the past N days.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn total_review_time_ms(&self, days: u32) -> Result<u64> {
        let cutoff = cutoff_ms(days);
        self.with_lock_mapped(|conn| {
            conn.query_row(
                "SELECT SUM(time) FROM revlog WHERE id > ?1",
                params![cutoff],
                |row| Ok(count_from(row.get::<_, Option<i64>>(0)?)),
            )
        })
    }

    /// Review counts per deck over the past N days, busiest deck first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn deck_review_counts(&self, days: u32) -> Result<Vec<(String, u64)>> {
        let cutoff = cutoff_ms(days);
        self.with_lock_mapped(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.did, COUNT(*) AS review_count
                 FROM revlog r
                 JOIN cards c ON r.cid = c.id
                 WHERE r.id > ?1
                 GROUP BY c.did
                 ORDER BY review_count DESC",
            )?;
            let rows = stmt.query_map(params![cutoff], |row| {
                Ok((
                    row.get::<_, i64>(0)?.to_string(),
                    count_from(row.get::<_, Option<i64>>(1)?),
                ))
            })?;
            rows.collect()
        })
    }

    fn with_lock_mapped<T>(
        &self,
        op: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        op(&self.conn).map_err(|e| map_locked(&self.path, e))
    }
}

/// Epoch-millisecond cutoff for "the past N days".
fn cutoff_ms(days: u32) -> i64 {
    (Local::now() - Duration::days(i64::from(days))).timestamp_millis()
}

fn count_from(value: Option<i64>) -> u64 {
    value.map_or(0, |v| u64::try_from(v).unwrap_or(0))
}

fn parse_sql_date(raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Build an `immutable=1` SQLite URI for the collection path.
fn immutable_uri(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut encoded = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '%' => encoded.push_str("%25"),
            '#' => encoded.push_str("%23"),
            '?' => encoded.push_str("%3f"),
            _ => encoded.push(ch),
        }
    }
    format!("file:{encoded}?immutable=1")
}

fn map_locked(path: &Path, err: rusqlite::Error) -> AnkiStatsError {
    if let rusqlite::Error::SqliteFailure(ffi_err, _) = &err {
        match ffi_err.code {
            rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                return AnkiStatsError::DatabaseLocked {
                    path: path.to_path_buf(),
                };
            }
            _ => {}
        }
    }
    AnkiStatsError::Database(err)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
