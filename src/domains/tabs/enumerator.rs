use crate::shared::editor_gateway::EditorGateway;
use std::path::PathBuf;

/// Absolute paths of every open, file-backed tab in display order.
/// Non-file tabs (settings UIs, diff views without a backing file) are
/// excluded.
pub async fn current_open_paths(editor: &dyn EditorGateway) -> Vec<PathBuf> {
    editor
        .open_tabs()
        .await
        .into_iter()
        .filter(|tab| tab.is_file_backed())
        .map(|tab| tab.path)
        .collect()
}
