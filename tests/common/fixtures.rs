//! Test fixtures: fake repository trees and a scripted git collaborator

use async_trait::async_trait;
use gitsweep::core::SweepError;
use gitsweep::git::GitActions;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// Builds a directory tree with fake repositories (a `.git` directory and an
/// optional `.git/config`), without invoking git
pub struct TreeBuilder {
    pub temp_dir: TempDir,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates a repository at `rel` whose config holds `remote_url`
    pub fn repo(self, rel: &str, remote_url: &str) -> Self {
        let config = format!(
            "[core]\n\trepositoryformatversion = 0\n[remote \"origin\"]\n\turl = {remote_url}\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n"
        );
        self.repo_with_config(rel, Some(&config))
    }

    /// Creates a repository at `rel`; `None` leaves out `.git/config`
    pub fn repo_with_config(self, rel: &str, config: Option<&str>) -> Self {
        let git_dir = self.root().join(rel).join(".git");
        fs::create_dir_all(&git_dir).expect("Failed to create .git directory");
        if let Some(config) = config {
            fs::write(git_dir.join("config"), config).expect("Failed to write .git/config");
        }
        self
    }

    /// Creates a plain directory at `rel`
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.root().join(rel)).expect("Failed to create directory");
        self
    }
}

/// A scripted [`GitActions`] implementation that records every call
#[derive(Default)]
pub struct FakeActions {
    pub branches: HashMap<String, String>,
    pub failing: Vec<String>,
    pub delays: HashMap<String, Duration>,
    pub calls: Mutex<Vec<PathBuf>>,
}

impl FakeActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch(mut self, dir_name: &str, branch: &str) -> Self {
        self.branches.insert(dir_name.to_string(), branch.to_string());
        self
    }

    pub fn failing(mut self, dir_name: &str) -> Self {
        self.failing.push(dir_name.to_string());
        self
    }

    pub fn slow(mut self, dir_name: &str, delay: Duration) -> Self {
        self.delays.insert(dir_name.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn dir_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    async fn act(&self, path: &Path) -> Result<(), SweepError> {
        self.calls.lock().unwrap().push(path.to_path_buf());

        let name = Self::dir_name(path);
        if let Some(delay) = self.delays.get(&name) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(&name) {
            Err(SweepError::GitCommand {
                command: "pull".to_string(),
                message: "could not read from remote".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GitActions for FakeActions {
    async fn pull(&self, path: &Path) -> Result<(), SweepError> {
        self.act(path).await
    }

    async fn fetch_prune(&self, path: &Path) -> Result<(), SweepError> {
        self.act(path).await
    }

    async fn garbage_collect(&self, path: &Path) -> Result<(), SweepError> {
        self.act(path).await
    }

    async fn branch_name(&self, path: &Path) -> String {
        self.branches
            .get(&Self::dir_name(path))
            .cloned()
            .unwrap_or_else(|| "master".to_string())
    }
}
