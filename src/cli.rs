use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "anki-stats")]
#[command(author, version, about = "Sync Anki study statistics into a git repository")]
#[command(long_about = "Reads a local Anki collection read-only, exports study statistics,\n\
    renders SVG charts and a Markdown summary, and optionally commits the\n\
    artifacts.\n\n\
    Exit codes:\n  \
    0 - Sync completed\n  \
    1 - Database missing or locked\n  \
    2 - Configuration or usage error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress per-step progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Skip loading .anki-stats.toml
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: export, charts, README, commit
    Sync(SyncArgs),

    /// Export stats.json, history.json and heatmap.json only
    Export(ExportArgs),

    /// Regenerate SVG charts from previously exported data
    Render(RenderArgs),

    /// Regenerate README.md from previously exported data
    Readme(ReadmeArgs),
}

#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Path to the Anki database (collection.anki2)
    #[arg(short = 'd', long = "db")]
    pub db: Option<PathBuf>,

    /// Repository root directory (default: current directory)
    #[arg(short, long)]
    pub repo: Option<PathBuf>,

    /// Export and render only, do not commit
    #[arg(long)]
    pub no_commit: bool,

    /// Push after committing
    #[arg(long)]
    pub push: bool,

    /// Commit even when the staged artifacts are unchanged
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Path to the Anki database (collection.anki2)
    #[arg(short = 'd', long = "db")]
    pub db: Option<PathBuf>,

    /// Repository root directory (default: current directory)
    #[arg(short, long)]
    pub repo: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Repository root directory (default: current directory)
    #[arg(short, long)]
    pub repo: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ReadmeArgs {
    /// Repository root directory (default: current directory)
    #[arg(short, long)]
    pub repo: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
