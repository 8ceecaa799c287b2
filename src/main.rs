use clap::Parser;
use env_logger::Env;

use anki_stats::cli::{Cli, Commands};
use anki_stats::commands::{run_export, run_readme, run_render, run_sync};

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let exit_code = match &cli.command {
        Commands::Sync(args) => run_sync(args, &cli),
        Commands::Export(args) => run_export(args, &cli),
        Commands::Render(args) => run_render(args, &cli),
        Commands::Readme(args) => run_readme(args, &cli),
    };

    std::process::exit(exit_code);
}
