//! Repository selection based on `.git/config` contents

use std::path::Path;

use super::error::{Result, SweepError};
use crate::git::ConfigReader;

/// What to do when a repository's configuration cannot be read while filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPolicy {
    /// Exclude the repository, log a warning and keep walking
    #[default]
    Skip,
    /// Abort the whole run
    Strict,
}

/// Decides whether a repository should be synced
///
/// An empty `criterion` selects every repository without touching its
/// configuration. Otherwise the repository is selected iff some configuration
/// line contains `criterion` (case-sensitive substring match).
pub fn should_sync(repo_path: &Path, criterion: &str, reader: &dyn ConfigReader) -> Result<bool> {
    if criterion.is_empty() {
        return Ok(true);
    }

    let lines = reader
        .config_lines(repo_path)
        .map_err(|source| SweepError::ConfigRead {
            path: reader.config_path(repo_path),
            source,
        })?;

    Ok(lines.iter().any(|line| line.contains(criterion)))
}

/// Applies `policy` to the outcome of [`should_sync`]
pub fn select(
    repo_path: &Path,
    criterion: &str,
    reader: &dyn ConfigReader,
    policy: FilterPolicy,
) -> Result<bool> {
    match should_sync(repo_path, criterion, reader) {
        Ok(selected) => Ok(selected),
        Err(e) if policy == FilterPolicy::Skip => {
            log::warn!("skipping {}: {e}", repo_path.display());
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
