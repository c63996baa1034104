use crate::errors::TabKeeperError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;

/// One repository as reported by the version-control integration.
pub trait RepositoryHandle: Send + Sync {
    /// Current branch name, or `None` while HEAD is detached or mid-rebase.
    fn head_branch(&self) -> Option<String>;

    /// Fires on any repository state change (branch, index, refs). The
    /// signal is deliberately over-broad; subscribers filter for the changes
    /// they care about.
    fn subscribe_state_changes(&self) -> broadcast::Receiver<()>;
}

/// Version-control signal source. Implementations either bridge the host's
/// own integration or observe a repository directly (see
/// [`crate::domains::git::GitVcsGateway`]).
#[async_trait]
pub trait VcsGateway: Send + Sync {
    /// Resolve the repository to track, suspending until the integration
    /// reports one. Implementations that can prove no repository will ever
    /// appear return `Err` instead of pending forever.
    async fn wait_for_repository(&self) -> Result<Arc<dyn RepositoryHandle>, TabKeeperError>;
}
