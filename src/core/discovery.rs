//! Repository discovery: walks each root and yields the repositories to act on

use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::config::{SweepConfig, CONTROL_DIR};
use super::detect::is_repository;
use super::error::Result;
use super::filter::{self, FilterPolicy};
use crate::git::ConfigReader;

/// A repository root found under one of the sweep roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub path: PathBuf,
    pub root: PathBuf,
    /// Path relative to `root` with any trailing `.git` suffix removed
    pub name: String,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let root = root.into();
        let name = display_name(&path, &root);
        Self { path, root, name }
    }
}

fn display_name(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    let name = relative.strip_suffix(CONTROL_DIR).unwrap_or(&relative);
    name.to_string()
}

/// Repository subtrees already claimed under one root
///
/// Once a directory is claimed, neither it nor anything beneath it can become
/// another repository for the same root.
#[derive(Debug, Default)]
pub struct ClaimedPaths {
    claimed: HashSet<PathBuf>,
}

impl ClaimedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, path: &Path) {
        self.claimed.insert(path.to_path_buf());
    }

    /// True when `path` is a claimed directory or lies beneath one
    pub fn covers(&self, path: &Path) -> bool {
        path.ancestors().any(|ancestor| self.claimed.contains(ancestor))
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// Tree walk options shared by every root of a run
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    pub filter: String,
    pub recursive: bool,
    pub filter_policy: FilterPolicy,
}

impl From<&SweepConfig> for WalkOptions {
    fn from(config: &SweepConfig) -> Self {
        Self {
            filter: config.filter.clone(),
            recursive: config.recursive,
            filter_policy: config.filter_policy,
        }
    }
}

/// Walks `root` depth-first and hands every selected repository to `emit`
///
/// `emit` returns false to stop the walk early (the consumer went away).
/// Returns the number of repositories emitted. The only error is a
/// configuration read failure under [`FilterPolicy::Strict`].
pub fn walk_root(
    root: &Path,
    options: &WalkOptions,
    reader: &dyn ConfigReader,
    mut emit: impl FnMut(Repository) -> bool,
) -> Result<usize> {
    if !root.is_dir() {
        log::warn!("{} is not a readable directory, skipping", root.display());
        return Ok(0);
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    if !options.recursive {
        builder.max_depth(Some(1));
    }

    let mut claimed = ClaimedPaths::new();
    let mut emitted = 0;

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("walk error under {}: {e}", root.display());
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }

        // The root itself is never a candidate
        if entry.depth() == 0 {
            continue;
        }

        if !options.recursive && entry.depth() > 1 {
            continue;
        }

        let path = entry.path();
        if claimed.covers(path) || !is_repository(path) {
            continue;
        }

        claimed.claim(path);
        log::debug!("claimed {}", path.display());

        if !filter::select(path, &options.filter, reader, options.filter_policy)? {
            log::debug!("filtered out {}", path.display());
            continue;
        }

        emitted += 1;
        if !emit(Repository::new(path, root)) {
            break;
        }
    }

    Ok(emitted)
}

/// Walks every root in order, each with its own claimed-path set
pub fn walk_roots(
    roots: &[PathBuf],
    options: &WalkOptions,
    reader: &dyn ConfigReader,
    mut emit: impl FnMut(Repository) -> bool,
) -> Result<usize> {
    let mut total = 0;
    let mut open = true;

    for root in roots {
        log::debug!("walking {}", root.display());
        total += walk_root(root, options, reader, |repo| {
            open = emit(repo);
            open
        })?;
        if !open {
            break;
        }
    }

    Ok(total)
}

/// Collects the repositories under `search_path` into a vector
///
/// Convenience wrapper around [`walk_root`] that reads `.git/config` from disk.
pub fn find_repos_from_path(
    search_path: impl AsRef<Path>,
    options: &WalkOptions,
) -> Result<Vec<Repository>> {
    let mut repos = Vec::new();
    walk_root(search_path.as_ref(), options, &crate::git::GitCli, |repo| {
        repos.push(repo);
        true
    })?;
    Ok(repos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_repo(path: &Path) {
        fs::create_dir_all(path.join(".git")).unwrap();
    }

    fn names(repos: &[Repository]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_claimed_paths_cover_descendants() {
        let mut claimed = ClaimedPaths::new();
        claimed.claim(Path::new("/root/b"));

        assert!(claimed.covers(Path::new("/root/b")));
        assert!(claimed.covers(Path::new("/root/b/sub")));
        assert!(claimed.covers(Path::new("/root/b/.git/refs")));
        assert!(!claimed.covers(Path::new("/root/bb")));
        assert!(!claimed.covers(Path::new("/root/a")));
        assert_eq!(claimed.len(), 1);
    }

    #[test]
    fn test_display_name_strips_root_and_suffix() {
        let repo = Repository::new("/home/me/code/app", "/home/me");
        assert_eq!(repo.name, "code/app");

        let bare = Repository::new("/srv/mirror.git", "/srv");
        assert_eq!(bare.name, "mirror");
    }

    #[test]
    fn test_root_is_never_a_repository() {
        let temp_dir = TempDir::new().unwrap();
        fake_repo(temp_dir.path());

        let repos = find_repos_from_path(temp_dir.path(), &WalkOptions::default()).unwrap();
        assert!(repos.is_empty());
    }

    #[test]
    fn test_non_recursive_only_checks_direct_children() {
        let temp_dir = TempDir::new().unwrap();
        fake_repo(&temp_dir.path().join("top"));
        fake_repo(&temp_dir.path().join("group/deep"));

        let repos = find_repos_from_path(temp_dir.path(), &WalkOptions::default()).unwrap();
        assert_eq!(names(&repos), vec!["top"]);
    }

    #[test]
    fn test_recursive_finds_deeper_repositories() {
        let temp_dir = TempDir::new().unwrap();
        fake_repo(&temp_dir.path().join("top"));
        fake_repo(&temp_dir.path().join("group/deep"));

        let options = WalkOptions {
            recursive: true,
            ..WalkOptions::default()
        };
        let repos = find_repos_from_path(temp_dir.path(), &options).unwrap();
        assert_eq!(names(&repos), vec!["group/deep", "top"]);
    }

    #[test]
    fn test_nested_repository_is_suppressed() {
        let temp_dir = TempDir::new().unwrap();
        fake_repo(&temp_dir.path().join("outer"));
        fake_repo(&temp_dir.path().join("outer/vendor/inner"));

        let options = WalkOptions {
            recursive: true,
            ..WalkOptions::default()
        };
        let repos = find_repos_from_path(temp_dir.path(), &options).unwrap();
        assert_eq!(names(&repos), vec!["outer"]);
    }

    #[test]
    fn test_emit_false_stops_the_walk() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            fake_repo(&temp_dir.path().join(name));
        }

        let mut seen = 0;
        let emitted = walk_root(
            temp_dir.path(),
            &WalkOptions::default(),
            &crate::git::GitCli,
            |_| {
                seen += 1;
                false
            },
        )
        .unwrap();

        assert_eq!(seen, 1);
        assert_eq!(emitted, 1);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let repos = find_repos_from_path(&missing, &WalkOptions::default()).unwrap();
        assert!(repos.is_empty());
    }
}
