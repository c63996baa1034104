use crate::errors::TabKeeperError;
use crate::shared::state_store::StateStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Storage key holding the serialized branch→tabs mapping.
pub const BRANCH_TABS_STATE_KEY: &str = "branch-tabs";

/// The saved open-file set of one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTabSet {
    pub paths: Vec<PathBuf>,
    pub saved_at: DateTime<Utc>,
}

/// Persisted mapping from branch name to the ordered file paths that were
/// open when the branch was last left. Entries are only ever written by the
/// reconciler's save step and are never pruned.
pub struct BranchTabStore {
    storage: Arc<dyn StateStore>,
    entries: Mutex<HashMap<String, SavedTabSet>>,
}

impl BranchTabStore {
    /// Read the persisted mapping. Absent or corrupt data yields an empty
    /// map; loading never fails.
    pub fn load(storage: Arc<dyn StateStore>) -> Self {
        let entries = match storage.get_raw(BRANCH_TABS_STATE_KEY) {
            Some(raw) => match serde_json::from_str::<HashMap<String, SavedTabSet>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("Discarding unreadable saved-tabs state: {err}");
                    HashMap::new()
                }
            },
            None => HashMap::new(),
        };

        log::debug!("Loaded saved tabs for {} branch(es)", entries.len());
        Self {
            storage,
            entries: Mutex::new(entries),
        }
    }

    /// Insert or overwrite the entry for `branch` and persist the full map
    /// before returning. Idempotent for identical input apart from the
    /// refreshed timestamp.
    pub fn save(&self, branch: &str, paths: Vec<PathBuf>) -> Result<(), TabKeeperError> {
        let mut entries = self.lock_entries();
        entries.insert(
            branch.to_string(),
            SavedTabSet {
                paths,
                saved_at: Utc::now(),
            },
        );

        let raw = serde_json::to_string(&*entries)
            .map_err(|e| TabKeeperError::storage("serialize", BRANCH_TABS_STATE_KEY, e))?;
        self.storage.set_raw(BRANCH_TABS_STATE_KEY, &raw)
    }

    /// Stored paths for `branch` in saved order; empty when absent.
    pub fn get(&self, branch: &str) -> Vec<PathBuf> {
        self.lock_entries()
            .get(branch)
            .map(|entry| entry.paths.clone())
            .unwrap_or_default()
    }

    /// Full entry including its save timestamp.
    pub fn entry(&self, branch: &str) -> Option<SavedTabSet> {
        self.lock_entries().get(branch).cloned()
    }

    /// All branch keys, sorted for deterministic presentation.
    pub fn branches(&self) -> Vec<String> {
        let mut branches: Vec<String> = self.lock_entries().keys().cloned().collect();
        branches.sort();
        branches
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, SavedTabSet>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
