//! Runs a sweep: overlaps the tree walk with dispatch and collects results
//! until everything has reported or the global deadline passes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::config::SweepConfig;
use super::discovery::{walk_roots, Repository, WalkOptions};
use super::dispatch::Dispatcher;
use super::error::{Result, SweepError};
use crate::git::{ConfigReader, GitActions};

/// Events sent from the walker thread to the collector
#[derive(Debug)]
pub enum WalkEvent {
    RepoDiscovered(Repository),
    WalkCompleted(Result<usize>),
}

/// How the collection phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    TimedOut,
}

/// Counts as of the result just delivered to the `run_sweep` callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub collected: usize,
    /// Units launched so far; grows while the walk is still running
    pub dispatched: usize,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Result lines in arrival order
    pub results: Vec<String>,
    pub dispatched: usize,
    pub status: RunStatus,
    pub elapsed: Duration,
}

impl RunOutcome {
    pub fn collected(&self) -> usize {
        self.results.len()
    }

    /// Units that were dispatched but never reported before the deadline
    pub fn missing(&self) -> usize {
        self.dispatched.saturating_sub(self.results.len())
    }

    pub fn timed_out(&self) -> bool {
        self.status == RunStatus::TimedOut
    }

    pub fn summary(&self) -> String {
        match self.status {
            RunStatus::Completed => format!(
                "✅ {} {} processed in {:.1}s",
                self.dispatched,
                if self.dispatched == 1 { "repository" } else { "repositories" },
                self.elapsed.as_secs_f64()
            ),
            RunStatus::TimedOut => format!(
                "⏱️ timed out after {:.1}s • {}/{} collected • {} still running",
                self.elapsed.as_secs_f64(),
                self.collected(),
                self.dispatched,
                self.missing()
            ),
        }
    }
}

fn spawn_walker(
    roots: Vec<PathBuf>,
    options: WalkOptions,
    reader: Arc<dyn ConfigReader>,
    events: mpsc::UnboundedSender<WalkEvent>,
) -> Result<()> {
    // Plain thread: an abandoned walk must not hold up runtime shutdown
    std::thread::Builder::new()
        .name("gitsweep-walker".to_string())
        .spawn(move || {
            let walked = walk_roots(&roots, &options, reader.as_ref(), |repo| {
                events.send(WalkEvent::RepoDiscovered(repo)).is_ok()
            });
            let _ = events.send(WalkEvent::WalkCompleted(walked));
        })?;
    Ok(())
}

/// Walks every root, dispatches one unit of work per selected repository and
/// collects results until all units reported or `config.timeout` elapsed.
///
/// `on_result` sees each line as it arrives, with the counts at that moment.
/// Units still running at the deadline are abandoned, not cancelled; their
/// late results are dropped.
/// Only a strict-mode configuration read failure makes this return an error.
pub async fn run_sweep(
    config: &SweepConfig,
    actions: Arc<dyn GitActions>,
    reader: Arc<dyn ConfigReader>,
    mut on_result: impl FnMut(&str, Progress),
) -> Result<RunOutcome> {
    let start = Instant::now();
    let deadline = tokio::time::sleep(config.timeout);
    tokio::pin!(deadline);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel();

    spawn_walker(
        config.roots.clone(),
        WalkOptions::from(config),
        reader,
        event_tx,
    )?;

    let mut dispatcher = Dispatcher::new(actions, config.action, config.concurrency, result_tx);
    let mut results = Vec::new();
    let mut walking = true;

    let status = loop {
        if !walking && results.len() == dispatcher.dispatched() {
            break RunStatus::Completed;
        }

        tokio::select! {
            _ = &mut deadline => break RunStatus::TimedOut,

            event = event_rx.recv(), if walking => match event {
                Some(WalkEvent::RepoDiscovered(repo)) => {
                    dispatcher.dispatch(repo);
                }
                Some(WalkEvent::WalkCompleted(walked)) => {
                    let found = walked?;
                    log::debug!("walk finished, {found} repositories selected");
                    walking = false;
                }
                None => return Err(SweepError::WalkerPanicked),
            },

            Some(line) = result_rx.recv(), if results.len() < dispatcher.dispatched() => {
                let progress = Progress {
                    collected: results.len() + 1,
                    dispatched: dispatcher.dispatched(),
                };
                on_result(&line, progress);
                results.push(line);
            }
        }
    };

    Ok(RunOutcome {
        dispatched: dispatcher.dispatched(),
        results,
        status,
        elapsed: start.elapsed(),
    })
}
