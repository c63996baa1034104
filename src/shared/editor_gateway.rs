use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// URI scheme of tabs backed by a concrete file on disk. Tabs with any other
/// scheme (settings UIs, diff views, untitled buffers) are ignored.
pub const FILE_SCHEME: &str = "file";

/// A single open editor tab as reported by the host window surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTab {
    pub path: PathBuf,
    pub scheme: String,
}

impl OpenTab {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scheme: FILE_SCHEME.to_string(),
        }
    }

    pub fn is_file_backed(&self) -> bool {
        self.scheme == FILE_SCHEME
    }
}

/// How a document should be presented when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    pub preview: bool,
    pub preserve_focus: bool,
}

impl Default for OpenOptions {
    /// Pinned (non-preview) tab that does not steal focus.
    fn default() -> Self {
        Self {
            preview: false,
            preserve_focus: true,
        }
    }
}

/// Host editor window surface. Implemented by the host bridge; consumers only
/// see this trait so the reconciliation logic stays host-agnostic.
#[async_trait]
pub trait EditorGateway: Send + Sync {
    /// Every currently open tab in display order. Infallible by contract;
    /// a host with no open editors returns an empty list.
    async fn open_tabs(&self) -> Vec<OpenTab>;

    /// Open the document at `path` as a tab.
    async fn open_path(&self, path: &Path, options: OpenOptions) -> Result<(), String>;

    /// Close the tab currently showing `path`.
    async fn close_path(&self, path: &Path) -> Result<(), String>;
}
