//! Subcommand runners. Each `run_x` wraps a `run_x_impl` returning
//! `Result<i32>` and maps errors onto the documented exit codes.

mod export;
mod readme;
mod render;
mod sync;

use std::path::{Path, PathBuf};

use crate::error::AnkiStatsError;
use crate::{EXIT_CONFIG_ERROR, EXIT_SYNC_FAILED};

pub use export::run_export;
pub use readme::run_readme;
pub use render::run_render;
pub use sync::run_sync;

pub(crate) use render::render_all_charts;

/// Resolve the repository root from the optional CLI override.
fn repo_root(override_path: Option<&Path>) -> PathBuf {
    override_path.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Exit code for a failed run: configuration problems are distinguished
/// from data-source failures.
const fn exit_code_for(error: &AnkiStatsError) -> i32 {
    match error {
        AnkiStatsError::Config(_) | AnkiStatsError::TomlParse(_) => EXIT_CONFIG_ERROR,
        _ => EXIT_SYNC_FAILED,
    }
}
