//! Launches one independent unit of work per discovered repository

use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;

use super::discovery::Repository;
use super::report::format_result;
use crate::git::{GitActions, SyncAction};

/// Spawns units of work and routes their results to the collector
pub struct Dispatcher {
    actions: Arc<dyn GitActions>,
    action: SyncAction,
    semaphore: Option<Arc<Semaphore>>,
    results: mpsc::UnboundedSender<String>,
    dispatched: usize,
}

impl Dispatcher {
    pub fn new(
        actions: Arc<dyn GitActions>,
        action: SyncAction,
        concurrency: Option<usize>,
        results: mpsc::UnboundedSender<String>,
    ) -> Self {
        Self {
            actions,
            action,
            semaphore: concurrency
                .map(|limit| Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS)))),
            results,
            dispatched: 0,
        }
    }

    /// Number of units launched so far
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Launches the unit of work for `repo` without waiting on it
    ///
    /// The concurrency permit is acquired inside the spawned task, so this
    /// never blocks the caller.
    pub fn dispatch(&mut self, repo: Repository) -> JoinHandle<()> {
        self.dispatched += 1;
        log::debug!("dispatching {}", repo.name);

        let actions = Arc::clone(&self.actions);
        let semaphore = self.semaphore.clone();
        let results = self.results.clone();
        let action = self.action;

        tokio::spawn(async move {
            let _permit = match semaphore.as_ref() {
                Some(semaphore) => match semaphore.acquire().await {
                    Ok(permit) => Some(permit),
                    // Closed semaphore: the run is over, nobody is listening
                    Err(_) => return,
                },
                None => None,
            };

            let line = run_unit(actions.as_ref(), action, &repo).await;

            // The collector may have hit its deadline; late results are dropped
            let _ = results.send(line);
        })
    }
}

/// Performs `action` on one repository and formats its result line
///
/// Failures of the action are folded into the failure marker, never returned.
pub async fn run_unit(actions: &dyn GitActions, action: SyncAction, repo: &Repository) -> String {
    let branch = actions.branch_name(&repo.path).await;

    let succeeded = match actions.perform(action, &repo.path).await {
        Ok(()) => true,
        Err(e) => {
            log::debug!("{} failed for {}: {e}", action, repo.name);
            false
        }
    };

    format_result(&repo.name, &branch, action, succeeded)
}
