//! Git collaborator: command execution and the per-repository sync actions

pub mod actions;
pub mod operations;

// Re-export commonly used items
pub use actions::{ConfigReader, GitActions, GitCli, SyncAction};
pub use operations::{run_git, run_git_checked};
