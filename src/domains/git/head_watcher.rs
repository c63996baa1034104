use crate::domains::git::repository;
use crate::errors::TabKeeperError;
use crate::shared::vcs_gateway::{RepositoryHandle, VcsGateway};
use async_trait::async_trait;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

/// Checkouts touch several files in quick succession; coalesce the burst
/// into a single state tick.
const GIT_WATCH_DEBOUNCE: Duration = Duration::from_millis(200);

const STATE_CHANGE_CAPACITY: usize = 32;

/// Version-control signal source observing a local repository directly:
/// `git2` resolves the head name, a debounced filesystem watch on the
/// `.git` directory supplies the state-change ticks.
pub struct GitVcsGateway {
    workdir: PathBuf,
    changes: broadcast::Sender<()>,
    _debouncer: Mutex<Debouncer<notify::RecommendedWatcher>>,
}

impl GitVcsGateway {
    /// Discover the repository containing `start` and begin watching its
    /// `.git` directory.
    pub fn discover(start: &Path) -> Result<Self, TabKeeperError> {
        let workdir = repository::discover_repository(start).map_err(TabKeeperError::vcs)?;
        let git_dir = repository::git_dir(&workdir)
            .map_err(|e| TabKeeperError::git("resolve-git-dir", e))?;

        let (changes, _) = broadcast::channel(STATE_CHANGE_CAPACITY);
        let tick = changes.clone();
        let mut debouncer = new_debouncer(GIT_WATCH_DEBOUNCE, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    if events.iter().any(|event| is_head_related(&event.path)) {
                        let _ = tick.send(());
                    }
                }
                Err(err) => log::warn!("Repository state watcher error: {err}"),
            }
        })
        .map_err(|e| TabKeeperError::watcher(git_dir.display(), e))?;

        debouncer
            .watcher()
            .watch(&git_dir, RecursiveMode::Recursive)
            .map_err(|e| TabKeeperError::watcher(git_dir.display(), e))?;

        log::debug!(
            "Watching '{}' for repository state changes",
            git_dir.display()
        );

        Ok(Self {
            workdir,
            changes,
            _debouncer: Mutex::new(debouncer),
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

#[async_trait]
impl VcsGateway for GitVcsGateway {
    async fn wait_for_repository(&self) -> Result<Arc<dyn RepositoryHandle>, TabKeeperError> {
        // Discovery already happened in `discover`; host-bridged gateways
        // are the ones that may suspend here.
        Ok(Arc::new(GitRepositoryHandle {
            workdir: self.workdir.clone(),
            changes: self.changes.clone(),
        }))
    }
}

struct GitRepositoryHandle {
    workdir: PathBuf,
    changes: broadcast::Sender<()>,
}

impl RepositoryHandle for GitRepositoryHandle {
    fn head_branch(&self) -> Option<String> {
        match repository::get_current_branch(&self.workdir) {
            Ok(name) => name,
            Err(err) => {
                log::debug!(
                    "Failed to resolve HEAD for '{}': {err}",
                    self.workdir.display()
                );
                None
            }
        }
    }

    fn subscribe_state_changes(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }
}

/// Only HEAD and ref updates are interesting; index churn, hooks and object
/// writes are filtered out before they become ticks.
fn is_head_related(path: &Path) -> bool {
    if path.components().any(|c| c.as_os_str() == "refs") {
        return true;
    }
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some("HEAD" | "packed-refs")
    )
}
