//! # gitsweep
//!
//! `gitsweep` finds every git repository under one or more root directories
//! and pulls, fetches (with prune) or garbage-collects all of them
//! concurrently, printing one line per repository. A global deadline bounds
//! the whole run.
//!
//! ## Core Features
//!
//! - **Nested-repository suppression**: a repository's working tree is never
//!   searched for further repositories.
//! - **Overlapped walk and dispatch**: work starts as soon as the first
//!   repository is found.
//! - **Config filtering**: only act on repositories whose `.git/config`
//!   mentions a given substring (e.g. an enterprise host).
//! - **Optional concurrency bound** for hosts with limited process capacity.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitsweep::core::{run_sweep, SweepConfig};
//! use gitsweep::git::GitCli;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SweepConfig::new(vec!["/home/me/code".into()]);
//!     let outcome = run_sweep(&config, Arc::new(GitCli), Arc::new(GitCli), |line, _progress| {
//!         println!("{line}");
//!     })
//!     .await?;
//!     println!("{}", outcome.summary());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod utils;
