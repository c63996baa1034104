pub mod activation;
pub mod domains;
pub mod errors;
pub mod infrastructure;
pub mod shared;

#[cfg(test)]
pub mod test_support;

pub use activation::{activate, ActivationHandle, ExtensionHost};
pub use domains::git::{BranchTransition, GitVcsGateway};
pub use domains::tabs::{BranchTabStore, SavedTabsTreeProvider, TabReconciler};
pub use errors::TabKeeperError;
