//! Public API for the core module.
//!
//! This module provides the stable public API for the sweep engine:
//! - Repository detection, filtering and discovery
//! - Dispatching and result collection
//! - Result formatting
//!
//! Internal implementation details are not exposed through this API.

// Errors
pub use super::error::{Result, SweepError};

// Detection and selection
pub use super::detect::is_repository;
pub use super::filter::{select, should_sync, FilterPolicy};

// Discovery
pub use super::discovery::{
    find_repos_from_path, walk_root, walk_roots, ClaimedPaths, Repository, WalkOptions,
};

// Dispatch and collection
pub use super::collector::{run_sweep, Progress, RunOutcome, RunStatus, WalkEvent};
pub use super::dispatch::{run_unit, Dispatcher};

// Formatting
pub use super::report::{clean_error_message, format_result, show_branch};

// Configuration
pub use super::config::{SweepConfig, DEFAULT_TIMEOUT_SECS, NO_REPOS_MESSAGE};
