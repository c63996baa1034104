pub mod head_watcher;
pub mod repository;
pub mod watcher;

pub use head_watcher::GitVcsGateway;
pub use watcher::{BranchTransition, BranchWatcher, TRANSITION_QUEUE_CAPACITY};
