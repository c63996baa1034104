//! Shared fakes for the host gateway traits, used across unit tests.

use crate::shared::editor_gateway::{EditorGateway, OpenOptions, OpenTab};
use crate::shared::prompt_gateway::PromptGateway;
use crate::shared::vcs_gateway::{RepositoryHandle, VcsGateway};
use crate::errors::TabKeeperError;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, Semaphore};

/// Capture log output in tests that assert on warn-and-continue behavior.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Scriptable stand-in for the host editor window.
#[derive(Default)]
pub struct FakeEditorGateway {
    tabs: Mutex<Vec<OpenTab>>,
    missing: Mutex<HashSet<PathBuf>>,
    opened: Mutex<Vec<PathBuf>>,
    closed: Mutex<Vec<PathBuf>>,
}

impl FakeEditorGateway {
    pub fn with_tabs(tabs: Vec<OpenTab>) -> Self {
        Self {
            tabs: Mutex::new(tabs),
            ..Self::default()
        }
    }

    pub fn set_open_files(&self, paths: &[&str]) {
        *self.tabs.lock().unwrap() = paths.iter().map(|path| OpenTab::file(*path)).collect();
    }

    /// Paths that fail to open, as if deleted from disk.
    pub fn mark_missing(&self, path: &str) {
        self.missing.lock().unwrap().insert(PathBuf::from(path));
    }

    /// Paths opened through the gateway, in call order.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }

    /// Paths closed through the gateway, in call order.
    pub fn closed(&self) -> Vec<PathBuf> {
        self.closed.lock().unwrap().clone()
    }
}

#[async_trait]
impl EditorGateway for FakeEditorGateway {
    async fn open_tabs(&self) -> Vec<OpenTab> {
        self.tabs.lock().unwrap().clone()
    }

    async fn open_path(&self, path: &Path, _options: OpenOptions) -> Result<(), String> {
        if self.missing.lock().unwrap().contains(path) {
            return Err(format!("ENOENT: {}", path.display()));
        }
        let mut tabs = self.tabs.lock().unwrap();
        if !tabs.iter().any(|tab| tab.path == path) {
            tabs.push(OpenTab::file(path));
        }
        self.opened.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn close_path(&self, path: &Path) -> Result<(), String> {
        let mut tabs = self.tabs.lock().unwrap();
        let before = tabs.len();
        tabs.retain(|tab| tab.path != path);
        if tabs.len() == before {
            return Err(format!("no open tab for {}", path.display()));
        }
        self.closed.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// Scriptable prompt surface. Responses are queued ahead of time; an empty
/// queue answers "dismissed".
#[derive(Default)]
pub struct FakePromptGateway {
    confirm_responses: Mutex<VecDeque<Option<bool>>>,
    pick_responses: Mutex<VecDeque<Option<String>>>,
    confirm_messages: Mutex<Vec<String>>,
    offered_options: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    confirm_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakePromptGateway {
    pub fn respond_confirm(&self, response: Option<bool>) {
        self.confirm_responses.lock().unwrap().push_back(response);
    }

    /// Queue a pick response by option label; `None` dismisses the picker.
    pub fn respond_pick(&self, label: Option<&str>) {
        self.pick_responses
            .lock()
            .unwrap()
            .push_back(label.map(|l| l.to_string()));
    }

    /// Make confirm prompts block until a permit is released, to simulate a
    /// user who has not answered yet.
    pub fn gate_confirms(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.confirm_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn confirm_messages(&self) -> Vec<String> {
        self.confirm_messages.lock().unwrap().clone()
    }

    /// Options offered by the most recent pick prompt.
    pub fn pick_options(&self) -> Vec<String> {
        self.offered_options.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl PromptGateway for FakePromptGateway {
    async fn confirm(&self, message: &str) -> Option<bool> {
        let gate = self.confirm_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }
        self.confirm_messages.lock().unwrap().push(message.to_string());
        self.confirm_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(None)
    }

    async fn pick(&self, _placeholder: &str, options: &[String]) -> Option<usize> {
        *self.offered_options.lock().unwrap() = options.to_vec();
        let response = self.pick_responses.lock().unwrap().pop_front().unwrap_or(None);
        response.map(|label| {
            options
                .iter()
                .position(|option| option == &label)
                .unwrap_or_else(|| panic!("option '{label}' not offered: {options:?}"))
        })
    }

    async fn show_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    async fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

struct FakeRepoState {
    head: Mutex<Option<String>>,
    changes: broadcast::Sender<()>,
}

/// Version-control source with a settable head name and manual state ticks.
pub struct FakeVcsGateway {
    state: Arc<FakeRepoState>,
    unavailable: bool,
}

impl FakeVcsGateway {
    pub fn with_head(head: &str) -> Self {
        Self::with_head_opt(Some(head))
    }

    pub fn with_head_opt(head: Option<&str>) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            state: Arc::new(FakeRepoState {
                head: Mutex::new(head.map(|h| h.to_string())),
                changes,
            }),
            unavailable: false,
        }
    }

    /// A source that can prove no repository will ever appear.
    pub fn unavailable() -> Self {
        let mut gateway = Self::with_head_opt(None);
        gateway.unavailable = true;
        gateway
    }

    pub fn set_head(&self, head: Option<&str>) {
        *self.state.head.lock().unwrap() = head.map(|h| h.to_string());
    }

    /// Fire the over-broad repository state-change event.
    pub fn tick(&self) {
        let _ = self.state.changes.send(());
    }
}

struct FakeRepositoryHandle {
    state: Arc<FakeRepoState>,
}

impl RepositoryHandle for FakeRepositoryHandle {
    fn head_branch(&self) -> Option<String> {
        self.state.head.lock().unwrap().clone()
    }

    fn subscribe_state_changes(&self) -> broadcast::Receiver<()> {
        self.state.changes.subscribe()
    }
}

#[async_trait]
impl VcsGateway for FakeVcsGateway {
    async fn wait_for_repository(&self) -> Result<Arc<dyn RepositoryHandle>, TabKeeperError> {
        if self.unavailable {
            return Err(TabKeeperError::vcs("no repositories reported"));
        }
        Ok(Arc::new(FakeRepositoryHandle {
            state: self.state.clone(),
        }))
    }
}
