use crate::domains::tabs::store::BranchTabStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Command invoked when a saved-path leaf is activated in the tree.
pub const OPEN_SAVED_TAB_COMMAND: &str = "tabkeeper.openSavedTab";

const CHANGE_CAPACITY: usize = 16;

/// A node in the saved-tabs tree. Two levels: branches at the root, their
/// saved paths underneath. Placeholders fill either level when empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Branch { name: String },
    SavedPath { branch: String, path: PathBuf },
    Placeholder { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeCommand {
    pub id: &'static str,
    pub path: PathBuf,
}

/// Display metadata the host needs to render one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub label: String,
    pub icon: &'static str,
    pub tooltip: Option<String>,
    pub command: Option<TreeCommand>,
    pub expandable: bool,
}

/// Read-only presentation of the store's contents. The provider holds the
/// live store handle, so `get_children` always reflects current state;
/// `refresh` only pushes the change notification that makes the host
/// re-query.
pub struct SavedTabsTreeProvider {
    store: Arc<BranchTabStore>,
    changed: broadcast::Sender<()>,
}

impl SavedTabsTreeProvider {
    pub fn new(store: Arc<BranchTabStore>) -> Self {
        let (changed, _) = broadcast::channel(CHANGE_CAPACITY);
        Self { store, changed }
    }

    /// Change-notification stream for the host's tree surface.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }

    /// Notify the presentation layer to redraw. Called after every
    /// successful save.
    pub fn refresh(&self) {
        let _ = self.changed.send(());
    }

    pub fn get_children(&self, node: Option<&TreeNode>) -> Vec<TreeNode> {
        match node {
            None => {
                let branches = self.store.branches();
                if branches.is_empty() {
                    return vec![TreeNode::Placeholder {
                        message: "No saved tabs yet".to_string(),
                    }];
                }
                branches
                    .into_iter()
                    .map(|name| TreeNode::Branch { name })
                    .collect()
            }
            Some(TreeNode::Branch { name }) => {
                let paths = self.store.get(name);
                if paths.is_empty() {
                    return vec![TreeNode::Placeholder {
                        message: "No files saved for this branch".to_string(),
                    }];
                }
                paths
                    .into_iter()
                    .map(|path| TreeNode::SavedPath {
                        branch: name.clone(),
                        path,
                    })
                    .collect()
            }
            Some(TreeNode::SavedPath { .. }) | Some(TreeNode::Placeholder { .. }) => Vec::new(),
        }
    }

    pub fn tree_item(&self, node: &TreeNode) -> TreeItem {
        match node {
            TreeNode::Branch { name } => {
                let tooltip = self.store.entry(name).map(|entry| {
                    format!(
                        "{} file(s) saved {}",
                        entry.paths.len(),
                        entry.saved_at.format("%Y-%m-%d %H:%M UTC")
                    )
                });
                TreeItem {
                    label: name.clone(),
                    icon: "git-branch",
                    tooltip,
                    command: None,
                    expandable: true,
                }
            }
            TreeNode::SavedPath { path, .. } => {
                let label = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                TreeItem {
                    label,
                    icon: "file",
                    tooltip: Some(path.display().to_string()),
                    command: Some(TreeCommand {
                        id: OPEN_SAVED_TAB_COMMAND,
                        path: path.clone(),
                    }),
                    expandable: false,
                }
            }
            TreeNode::Placeholder { message } => TreeItem {
                label: message.clone(),
                icon: "info",
                tooltip: None,
                command: None,
                expandable: false,
            },
        }
    }
}
