//! Configuration constants and settings

use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::core::filter::FilterPolicy;
use crate::core::SweepError;
use crate::git::SyncAction;

// Name of the reserved control directory that marks a repository root
pub const CONTROL_DIR: &str = ".git";
// Repository configuration file, relative to the repository root
pub const CONFIG_FILE: &str = "config";

// Separator between root paths passed through --path
pub const PATH_SEPARATOR: char = ':';

// Global deadline for collecting results
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Cap used when --jobs 0 asks for a CPU-derived bound
pub const GIT_CONCURRENT_CAP: usize = 12;

// Result decoration
pub const SUCCESS_MARKER: &str = "👍🏼️";
pub const FAILURE_MARKER: &str = "💥";
pub const BRANCH_MARKER: &str = "🌿️";
pub const NO_BRANCH_NAME: &str = "no branch name";
pub const DEFAULT_BRANCHES: &[&str] = &["master", "main"];
pub const TAG_PREFIX: &str = "tags/";

// UI Constants
pub const NO_REPOS_MESSAGE: &str = "No git repositories found.";
pub const PROGRESS_TEMPLATE: &str = "{spinner} {prefix:.bold} {wide_msg}";

/// Everything a single sweep needs to know, resolved from CLI flags and defaults
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub roots: Vec<PathBuf>,
    /// Substring that must occur in `.git/config`; empty means no filtering
    pub filter: String,
    pub recursive: bool,
    pub action: SyncAction,
    pub timeout: Duration,
    /// `None` launches one unit of work per repository without a bound
    pub concurrency: Option<usize>,
    pub filter_policy: FilterPolicy,
}

impl SweepConfig {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            filter: String::new(),
            recursive: false,
            action: SyncAction::Pull,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: None,
            filter_policy: FilterPolicy::default(),
        }
    }
}

/// Splits a colon separated `--path` value into roots, dropping empty segments
pub fn parse_roots(paths: &str) -> Vec<PathBuf> {
    paths
        .split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Resolves the roots to walk, falling back to the home directory
pub fn resolve_roots(paths: Option<&str>) -> Result<Vec<PathBuf>, SweepError> {
    match paths.map(parse_roots) {
        Some(roots) if !roots.is_empty() => Ok(roots),
        _ => dirs::home_dir()
            .map(|home| vec![home])
            .ok_or(SweepError::HomeDirUnavailable),
    }
}

/// Picks the action from the mutually exclusive flags: clean beats fetch beats pull
pub fn select_action(fetch: bool, clean: bool) -> SyncAction {
    if clean {
        SyncAction::GarbageCollect
    } else if fetch {
        SyncAction::FetchPrune
    } else {
        SyncAction::Pull
    }
}

/// Determines the concurrency bound for units of work
///
/// Priority order:
/// 1. --sequential flag → 1
/// 2. --jobs 0 → min(CPU_CORES + 2, 12)
/// 3. --jobs N → N, capped at the most permits a semaphore can hold
/// 4. Default → unbounded, one in-flight unit per repository
pub fn resolve_concurrency(jobs: Option<usize>, sequential: bool) -> Option<usize> {
    if sequential {
        return Some(1);
    }

    match jobs {
        Some(0) => Some((num_cpus::get() + 2).min(GIT_CONCURRENT_CAP)),
        Some(n) => Some(n.min(Semaphore::MAX_PERMITS)),
        None => None,
    }
}

/// Converts `--timeout` seconds into the global deadline, never shorter than a second
pub fn resolve_timeout(secs: Option<u64>) -> Duration {
    Duration::from_secs(secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
}
