//! The sync actions and the collaborator traits the sweep engine calls

use async_trait::async_trait;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::operations::{
    run_git, run_git_checked, GIT_FETCH_PRUNE_ARGS, GIT_GC_ARGS, GIT_NAME_REV_ARGS, GIT_PULL_ARGS,
};
use crate::core::config::{CONFIG_FILE, CONTROL_DIR, NO_BRANCH_NAME};
use crate::core::SweepError;

/// The action applied to every repository of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncAction {
    #[default]
    Pull,
    FetchPrune,
    GarbageCollect,
}

impl SyncAction {
    /// Short name used as the result prefix; pull, the default, has none
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            SyncAction::Pull => None,
            SyncAction::FetchPrune => Some("fetch"),
            SyncAction::GarbageCollect => Some("clean"),
        }
    }

    pub fn git_args(&self) -> &'static [&'static str] {
        match self {
            SyncAction::Pull => GIT_PULL_ARGS,
            SyncAction::FetchPrune => GIT_FETCH_PRUNE_ARGS,
            SyncAction::GarbageCollect => GIT_GC_ARGS,
        }
    }
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.git_args().join(" ").as_str())
    }
}

/// Version-control operations invoked once per repository
#[async_trait]
pub trait GitActions: Send + Sync {
    async fn pull(&self, path: &Path) -> Result<(), SweepError>;

    async fn fetch_prune(&self, path: &Path) -> Result<(), SweepError>;

    async fn garbage_collect(&self, path: &Path) -> Result<(), SweepError>;

    /// Best-effort name of the checked out revision; never fails
    async fn branch_name(&self, path: &Path) -> String;

    /// Runs `action` against `path`
    async fn perform(&self, action: SyncAction, path: &Path) -> Result<(), SweepError> {
        match action {
            SyncAction::Pull => self.pull(path).await,
            SyncAction::FetchPrune => self.fetch_prune(path).await,
            SyncAction::GarbageCollect => self.garbage_collect(path).await,
        }
    }
}

/// Source of a repository's configuration lines, consulted by the filter
pub trait ConfigReader: Send + Sync {
    fn config_path(&self, repo_path: &Path) -> PathBuf {
        repo_path.join(CONTROL_DIR).join(CONFIG_FILE)
    }

    fn config_lines(&self, repo_path: &Path) -> io::Result<Vec<String>>;
}

/// The real collaborator: shells out to `git` and reads `.git/config` from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

#[async_trait]
impl GitActions for GitCli {
    async fn pull(&self, path: &Path) -> Result<(), SweepError> {
        run_git_checked(path, GIT_PULL_ARGS).await.map(|_| ())
    }

    async fn fetch_prune(&self, path: &Path) -> Result<(), SweepError> {
        run_git_checked(path, GIT_FETCH_PRUNE_ARGS).await.map(|_| ())
    }

    async fn garbage_collect(&self, path: &Path) -> Result<(), SweepError> {
        run_git_checked(path, GIT_GC_ARGS).await.map(|_| ())
    }

    async fn branch_name(&self, path: &Path) -> String {
        match run_git(path, GIT_NAME_REV_ARGS).await {
            Ok((true, name, _)) if !name.is_empty() => name,
            _ => NO_BRANCH_NAME.to_string(),
        }
    }
}

impl ConfigReader for GitCli {
    fn config_lines(&self, repo_path: &Path) -> io::Result<Vec<String>> {
        let file = File::open(self.config_path(repo_path))?;
        BufReader::new(file).lines().collect()
    }
}
