//! Shared fixture for CLI integration tests: a temp repository root and a
//! synthetic Anki collection.
#![allow(dead_code)] // not every test crate uses every helper

use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use chrono::{Duration, Local};
use rusqlite::{Connection, params};
use tempfile::TempDir;

pub struct TestFixture {
    temp: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Build a small but realistic collection: two decks, cards in every
    /// state, reviews today and yesterday.
    pub fn create_collection(&self) -> PathBuf {
        let db_path = self.path().join("collection.anki2");
        let conn = Connection::open(&db_path).expect("create collection");

        conn.execute_batch(
            "CREATE TABLE cards (
                id INTEGER PRIMARY KEY,
                did INTEGER NOT NULL,
                type INTEGER NOT NULL,
                queue INTEGER NOT NULL
             );
             CREATE TABLE revlog (
                id INTEGER PRIMARY KEY,
                cid INTEGER NOT NULL,
                ease INTEGER NOT NULL,
                ivl INTEGER NOT NULL,
                time INTEGER NOT NULL,
                type INTEGER NOT NULL
             );
             CREATE TABLE decks (id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
        )
        .expect("create schema");

        conn.execute(
            "INSERT INTO decks (id, name) VALUES (1, ?1), (2, 'Geography')",
            params![format!("Japanese{}Vocab", '\x1f')],
        )
        .expect("insert decks");

        // Deck 1: 2 mature, 1 new, 1 suspended; deck 2: 1 learning.
        let cards: &[(i64, i64, i64, i64)] = &[
            (1, 1, 2, 2),
            (2, 1, 2, 2),
            (3, 1, 0, 0),
            (4, 1, 2, -1),
            (5, 2, 1, 1),
        ];
        for (id, did, card_type, queue) in cards {
            conn.execute(
                "INSERT INTO cards (id, did, type, queue) VALUES (?1, ?2, ?3, ?4)",
                params![id, did, card_type, queue],
            )
            .expect("insert card");
        }

        let now = Local::now().timestamp_millis();
        let yesterday = (Local::now() - Duration::days(1)).timestamp_millis();
        let reviews: &[(i64, i64)] = &[
            (now - 1_000, 1),
            (now - 2_000, 2),
            (now - 3_000, 5),
            (yesterday - 1_000, 1),
            (yesterday - 2_000, 1),
        ];
        for (id, cid) in reviews {
            conn.execute(
                "INSERT INTO revlog (id, cid, ease, ivl, time, type) VALUES (?1, ?2, 3, 1, 60000, 0)",
                params![id, cid],
            )
            .expect("insert review");
        }

        db_path
    }

    /// Turn the fixture root into a git repository with an identity
    /// configured, ready to receive sync commits.
    pub fn init_git(&self) {
        for args in [
            vec!["init", "-q", "-b", "main"],
            vec!["config", "user.email", "sync@test.invalid"],
            vec!["config", "user.name", "Sync Test"],
        ] {
            let status = StdCommand::new("git")
                .args(&args)
                .current_dir(self.path())
                .status()
                .expect("run git");
            assert!(status.success(), "git {args:?} failed");
        }
    }

    pub fn git_log(&self) -> String {
        let output = StdCommand::new("git")
            .args(["log", "--oneline"])
            .current_dir(self.path())
            .output()
            .expect("run git log");
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

/// The binary under test, isolated from the caller's environment.
pub fn anki_stats() -> Command {
    let mut cmd = Command::cargo_bin("anki-stats").expect("binary builds");
    cmd.env_remove("ANKI_DB_PATH");
    cmd
}
