use crate::errors::TabKeeperError;
use crate::shared::vcs_gateway::VcsGateway;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

/// Pending transitions wait here while an earlier one is still being
/// handled; on overflow the newest transition is dropped rather than
/// interleaving prompts.
pub const TRANSITION_QUEUE_CAPACITY: usize = 8;

/// A change of the active branch. `previous` is `None` only for the very
/// first resolution, which the watcher never emits; consumers still treat
/// it as optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTransition {
    pub previous: Option<String>,
    pub current: String,
}

/// Observes the active branch name and forwards one [`BranchTransition`]
/// per actual name change. Duplicate change events and undefined names
/// (detached HEAD, mid-rebase) are suppressed.
pub struct BranchWatcher {
    transitions: mpsc::Receiver<BranchTransition>,
    task: JoinHandle<()>,
}

impl BranchWatcher {
    /// Resolve the repository and its initial branch name, then start
    /// forwarding transitions. The initial resolution seeds the comparison
    /// value and does not emit.
    pub async fn subscribe(vcs: Arc<dyn VcsGateway>) -> Result<Self, TabKeeperError> {
        let repo = vcs.wait_for_repository().await?;
        let mut ticks = repo.subscribe_state_changes();

        let mut last_known = match repo.head_branch() {
            Some(name) => name,
            None => loop {
                match ticks.recv().await {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        if let Some(name) = repo.head_branch() {
                            break name;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(TabKeeperError::vcs(
                            "repository state stream closed before a branch was resolved",
                        ));
                    }
                }
            },
        };
        log::info!("Tracking branch '{last_known}'");

        let (tx, rx) = mpsc::channel(TRANSITION_QUEUE_CAPACITY);
        let task = tokio::spawn(async move {
            loop {
                match ticks.recv().await {
                    // A lagged receiver only means ticks coalesced; the next
                    // head read observes the latest state either way.
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                }

                let Some(current) = repo.head_branch() else {
                    continue;
                };
                if current == last_known {
                    continue;
                }

                let transition = BranchTransition {
                    previous: Some(last_known.clone()),
                    current: current.clone(),
                };
                last_known = current;

                match tx.try_send(transition) {
                    Ok(()) => {}
                    Err(TrySendError::Full(dropped)) => {
                        log::warn!(
                            "Transition queue full; dropping switch to '{}'",
                            dropped.current
                        );
                    }
                    Err(TrySendError::Closed(_)) => break,
                }
            }
        });

        Ok(Self {
            transitions: rx,
            task,
        })
    }

    /// Next branch transition, in the order the host raised them. `None`
    /// once the underlying state stream has closed.
    pub async fn next_transition(&mut self) -> Option<BranchTransition> {
        self.transitions.recv().await
    }
}

impl Drop for BranchWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
