use crate::chart::format_thousands;
use crate::cli::{Cli, ExportArgs};
use crate::config::Config;
use crate::export::DataExporter;
use crate::reader::resolve_db_path;
use crate::stats::StatsCalculator;
use crate::{EXIT_SUCCESS, Result};

use super::{exit_code_for, repo_root};

#[must_use]
pub fn run_export(args: &ExportArgs, cli: &Cli) -> i32 {
    match run_export_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code_for(&e)
        }
    }
}

fn run_export_impl(args: &ExportArgs, cli: &Cli) -> Result<i32> {
    let root = repo_root(args.repo.as_deref());
    let config = Config::load(&root, cli.no_config)?;

    let db_path = resolve_db_path(
        args.db.as_deref().or(config.database.path.as_deref()),
    )?;
    log::info!("reading collection at {}", db_path.display());

    let snapshot = StatsCalculator::new(&db_path).collect()?;
    DataExporter::new(&root).export_all(&snapshot)?;

    if !cli.quiet {
        println!(
            "Exported statistics: {} cards, {} day streak",
            format_thousands(snapshot.cards.total),
            snapshot.streak
        );
    }

    Ok(EXIT_SUCCESS)
}
