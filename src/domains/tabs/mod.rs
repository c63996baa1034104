pub mod enumerator;
pub mod reconciler;
pub mod store;
pub mod view;

pub use reconciler::{LoadChoice, ReconcileOutcome, TabReconciler};
pub use store::{BranchTabStore, SavedTabSet, BRANCH_TABS_STATE_KEY};
pub use view::{SavedTabsTreeProvider, TreeItem, TreeNode, OPEN_SAVED_TAB_COMMAND};
