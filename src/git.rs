//! Version-control side effects.
//!
//! Repository detection and context capture go through gix (read-only);
//! the mutations (stage, commit, push) run as blocking `git` subprocesses,
//! strictly sequential. Callers treat mutation failures as warnings, never
//! as run failures.

use std::path::Path;
use std::process::Command;

use crate::error::{AnkiStatsError, Result};

/// Git repository context at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitContext {
    /// Short commit hash (e.g., "a1b2c3d")
    pub commit: String,
    /// Branch name if on a branch (None for detached HEAD)
    pub branch: Option<String>,
}

impl GitContext {
    /// Short hash length (7 characters, Git's default for short SHA)
    const SHORT_HASH_LEN: usize = 7;

    /// Get current git context for a repository at the given path.
    ///
    /// Returns `None` if the path is not in a git repository, the
    /// repository has no commits, or any git operation fails.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let repo = gix::discover(path).ok()?;
        let head_commit = repo.head_commit().ok()?;
        let commit_id = head_commit.id();
        let full_hash = commit_id.to_string();
        let commit = full_hash
            .get(..Self::SHORT_HASH_LEN)
            .unwrap_or(&full_hash)
            .to_string();

        let branch = repo
            .head_name()
            .ok()
            .flatten()
            .map(|name| name.shorten().to_string());

        Some(Self { commit, branch })
    }
}

/// Whether `root` is inside a git repository.
#[must_use]
pub fn is_repository(root: &Path) -> bool {
    gix::discover(root).is_ok()
}

/// Outcome of one git subprocess.
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Run one blocking git subprocess in `root`.
///
/// # Errors
/// Returns an error only when the `git` executable cannot be spawned;
/// a non-zero exit is reported through [`GitOutput::success`].
pub fn run_git(root: &Path, args: &[&str]) -> Result<GitOutput> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .map_err(|e| AnkiStatsError::Git(format!("failed to run git: {e}")))?;

    Ok(GitOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Stage the given paths. Paths that do not exist yet are skipped by git
/// itself; individual failures are logged and do not abort staging.
///
/// # Errors
/// Returns an error if git cannot be spawned.
pub fn stage(root: &Path, paths: &[&str]) -> Result<()> {
    for path in paths {
        let output = run_git(root, &["add", path])?;
        if !output.success {
            log::debug!("git add {path} failed: {}", output.stderr.trim());
        }
    }
    Ok(())
}

/// Whether anything is staged for commit.
///
/// # Errors
/// Returns an error if git cannot be spawned.
pub fn has_staged_changes(root: &Path) -> Result<bool> {
    // diff --cached --quiet exits 0 when the index matches HEAD.
    let output = run_git(root, &["diff", "--cached", "--quiet"])?;
    Ok(!output.success)
}

/// Commit the staged artifacts.
///
/// # Errors
/// Returns an error if git cannot be spawned or the commit fails.
pub fn commit(root: &Path, message: &str, allow_empty: bool) -> Result<()> {
    let mut args = vec!["commit", "-m", message];
    if allow_empty {
        args.push("--allow-empty");
    }

    let output = run_git(root, &args)?;
    if output.success {
        Ok(())
    } else {
        Err(AnkiStatsError::Git(format!(
            "commit failed: {}",
            output.stderr.trim()
        )))
    }
}

/// Push the current branch to its upstream.
///
/// # Errors
/// Returns an error if git cannot be spawned or the push fails.
pub fn push(root: &Path) -> Result<()> {
    let output = run_git(root, &["push"])?;
    if output.success {
        Ok(())
    } else {
        Err(AnkiStatsError::Git(format!(
            "push failed: {}",
            output.stderr.trim()
        )))
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
