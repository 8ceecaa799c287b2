use std::path::Path;

use crate::chart::format_thousands;
use crate::cli::{Cli, SyncArgs};
use crate::config::Config;
use crate::export::{DataExporter, write_atomic};
use crate::reader::resolve_db_path;
use crate::report::generate_readme;
use crate::stats::{StatsCalculator, StatsSnapshot};
use crate::{EXIT_SUCCESS, Result, git};

use super::render::OUTPUT_DIR;
use super::{exit_code_for, render_all_charts, repo_root};

/// Everything a sync run may touch, relative to the repository root.
const ARTIFACT_PATHS: &[&str] = &[
    "data/stats.json",
    "data/history.json",
    "data/heatmap.json",
    "output/heatmap.svg",
    "output/heatmap-dark.svg",
    "output/decks.svg",
    "output/decks-dark.svg",
    "output/weekly.svg",
    "output/weekly-dark.svg",
    "output/time.svg",
    "output/time-dark.svg",
    "output/reviews.svg",
    "output/reviews-dark.svg",
    "output/cards.svg",
    "output/cards-dark.svg",
    "output/stats-card.svg",
    "output/stats-card-dark.svg",
    "output/progress-ring.svg",
    "output/progress-bar.svg",
    "README.md",
];

#[must_use]
pub fn run_sync(args: &SyncArgs, cli: &Cli) -> i32 {
    match run_sync_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code_for(&e)
        }
    }
}

fn run_sync_impl(args: &SyncArgs, cli: &Cli) -> Result<i32> {
    let root = repo_root(args.repo.as_deref());
    let config = Config::load(&root, cli.no_config)?;

    let commit = config.sync.commit && !args.no_commit;
    let push = config.sync.push || args.push;

    // 1. Export data from the collection
    step(cli, 1, "Exporting statistics...");
    let db_path = resolve_db_path(
        args.db.as_deref().or(config.database.path.as_deref()),
    )?;
    let snapshot = StatsCalculator::new(&db_path).collect()?;
    DataExporter::new(&root).export_all(&snapshot)?;
    if !cli.quiet {
        println!(
            "  - Total cards: {}",
            format_thousands(snapshot.cards.total)
        );
        println!("  - Current streak: {} days", snapshot.streak);
        println!(
            "  - Weekly reviews: {}",
            format_thousands(snapshot.weekly_reviews)
        );
    }

    // 2-3. Render all SVG charts
    step(cli, 2, "Generating heatmap...");
    step(cli, 3, "Generating charts...");
    render_all_charts(&snapshot, &root.join(OUTPUT_DIR), &config.charts)?;

    // 4. Generate README
    step(cli, 4, "Generating README...");
    write_atomic(
        &root.join("README.md"),
        generate_readme(&snapshot).as_bytes(),
    )?;

    // 5. Commit (optional, failures are non-fatal)
    if commit {
        step(cli, 5, "Committing changes...");
        commit_artifacts(&root, &snapshot, args.force, cli);
    } else {
        step(cli, 5, "Skipping commit (--no-commit)");
    }

    // 6. Push (optional, failures are non-fatal)
    if commit && push {
        step(cli, 6, "Pushing to remote...");
        if let Err(e) = git::push(&root) {
            log::warn!("{e}");
            note(cli, "push failed, statistics were still exported");
        }
    }

    if !cli.quiet {
        println!("Sync complete!");
    }

    Ok(EXIT_SUCCESS)
}

/// Stage, check for changes and commit. Every failure here is reported
/// and swallowed: the exported statistics are the product of the run, a
/// commit is only the delivery.
fn commit_artifacts(root: &Path, snapshot: &StatsSnapshot, force: bool, cli: &Cli) {
    if !git::is_repository(root) {
        note(cli, "not a git repository, skipping commit");
        return;
    }

    if let Some(context) = git::GitContext::from_path(root) {
        log::debug!(
            "repository at {} (branch {})",
            context.commit,
            context.branch.as_deref().unwrap_or("detached")
        );
    }

    if let Err(e) = git::stage(root, ARTIFACT_PATHS) {
        log::warn!("{e}");
        return;
    }

    let staged = match git::has_staged_changes(root) {
        Ok(staged) => staged,
        Err(e) => {
            log::warn!("{e}");
            return;
        }
    };

    if !staged && !force {
        note(cli, "no changes to commit");
        return;
    }

    let message = format!(
        "chore: sync anki stats ({})",
        snapshot.generated_date().format("%Y-%m-%d")
    );
    match git::commit(root, &message, force && !staged) {
        Ok(()) => note(cli, &format!("committed: {message}")),
        Err(e) => {
            log::warn!("{e}");
            note(cli, "commit failed, statistics were still exported");
        }
    }
}

fn step(cli: &Cli, number: u8, message: &str) {
    if !cli.quiet {
        println!("[{number}/6] {message}");
    }
}

fn note(cli: &Cli, message: &str) {
    if !cli.quiet {
        println!("  - {message}");
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
