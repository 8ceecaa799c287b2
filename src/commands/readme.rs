use crate::cli::{Cli, ReadmeArgs};
use crate::export::{DataExporter, write_atomic};
use crate::report::generate_readme;
use crate::{EXIT_SUCCESS, Result};

use super::{exit_code_for, repo_root};

#[must_use]
pub fn run_readme(args: &ReadmeArgs, cli: &Cli) -> i32 {
    match run_readme_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code_for(&e)
        }
    }
}

fn run_readme_impl(args: &ReadmeArgs, cli: &Cli) -> Result<i32> {
    let root = repo_root(args.repo.as_deref());

    let snapshot = DataExporter::new(&root).load_snapshot()?;
    let readme_path = root.join("README.md");
    write_atomic(&readme_path, generate_readme(&snapshot).as_bytes())?;

    if !cli.quiet {
        println!("Generated {}", readme_path.display());
    }

    Ok(EXIT_SUCCESS)
}
