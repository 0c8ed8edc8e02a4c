//! Sweep command implementation
//!
//! Resolves CLI options into a [`SweepConfig`], runs the sweep against the
//! real git collaborator and prints each result line as it arrives.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::core::config::{
    resolve_concurrency, resolve_roots, resolve_timeout, select_action, PROGRESS_TEMPLATE,
};
use crate::core::{run_sweep, FilterPolicy, Progress, RunOutcome, SweepConfig, NO_REPOS_MESSAGE};
use crate::git::GitCli;

const SPINNER_TICK_MS: u64 = 120;

/// Raw options as given on the command line
#[derive(Debug, Clone, Default)]
pub struct SweepArgs {
    pub path: Option<String>,
    pub filter: Option<String>,
    pub recursive: bool,
    pub fetch: bool,
    pub clean: bool,
    pub timeout_secs: Option<u64>,
    pub jobs: Option<usize>,
    pub sequential: bool,
    pub strict: bool,
}

impl SweepArgs {
    /// Resolves flags and defaults into a run configuration
    pub fn into_config(self) -> Result<SweepConfig> {
        let roots = resolve_roots(self.path.as_deref())?;

        Ok(SweepConfig {
            roots,
            filter: self.filter.unwrap_or_default(),
            recursive: self.recursive,
            action: select_action(self.fetch, self.clean),
            timeout: resolve_timeout(self.timeout_secs),
            concurrency: resolve_concurrency(self.jobs, self.sequential),
            filter_policy: if self.strict {
                FilterPolicy::Strict
            } else {
                FilterPolicy::Skip
            },
        })
    }
}

fn create_spinner(action: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template(PROGRESS_TEMPLATE)?);
    spinner.set_prefix(action.to_string());
    spinner.set_message("scanning...");
    spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    Ok(spinner)
}

fn progress_message(progress: Progress) -> String {
    format!("{}/{} collected", progress.collected, progress.dispatched)
}

/// Handles the sweep command: walk, dispatch, print results and a summary
pub async fn handle_sweep_command(args: SweepArgs) -> Result<RunOutcome> {
    let config = args.into_config()?;

    log::info!(
        "git {} across {} root(s), timeout {}s, concurrency {}",
        config.action,
        config.roots.len(),
        config.timeout.as_secs(),
        config
            .concurrency
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
    );

    let spinner = create_spinner(&config.action.to_string())?;

    let git = Arc::new(GitCli);
    let outcome = run_sweep(&config, git.clone(), git, |line, progress| {
        spinner.suspend(|| println!("{line}"));
        spinner.set_message(progress_message(progress));
    })
    .await
    .context("sweep aborted")?;

    spinner.finish_and_clear();

    if outcome.dispatched == 0 && !outcome.timed_out() {
        println!("{NO_REPOS_MESSAGE}");
    } else {
        println!("{}", outcome.summary());
    }

    Ok(outcome)
}
