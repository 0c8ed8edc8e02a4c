//! Basic git command execution

use std::path::Path;
use tokio::process::Command;

use crate::core::{clean_error_message, SweepError};

// Git command arguments
pub(crate) const GIT_PULL_ARGS: &[&str] = &["pull"];
pub(crate) const GIT_FETCH_PRUNE_ARGS: &[&str] = &["fetch", "--prune"];
pub(crate) const GIT_GC_ARGS: &[&str] = &["gc", "--quiet"];
pub(crate) const GIT_NAME_REV_ARGS: &[&str] = &["name-rev", "--name-only", "HEAD"];

/// Runs a git command in the specified directory
/// Returns (success, stdout, stderr)
///
/// No per-command timeout: the sweep's global deadline is the only bound and
/// children abandoned by it are left to finish on their own.
pub async fn run_git(path: &Path, args: &[&str]) -> Result<(bool, String, String), SweepError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .stdin(std::process::Stdio::null())
        .output()
        .await?;

    Ok((
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
    ))
}

/// Runs a git command and maps a non-zero exit into [`SweepError::GitCommand`]
pub async fn run_git_checked(path: &Path, args: &[&str]) -> Result<String, SweepError> {
    match run_git(path, args).await? {
        (true, stdout, _) => Ok(stdout),
        (false, _, stderr) => Err(SweepError::GitCommand {
            command: args.join(" "),
            message: clean_error_message(&stderr),
        }),
    }
}
