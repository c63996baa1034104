use crate::shared::state_store::StateStore;
use serde::{Deserialize, Serialize};

/// Storage key holding the serialized settings.
pub const SETTINGS_STATE_KEY: &str = "settings";

/// How reconciliation converges the open-file set toward the target.
///
/// `Additive` keeps everything that is already open and only opens missing
/// paths. `Replace` additionally closes open file tabs that are not part of
/// the target set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcilePolicy {
    #[default]
    Additive,
    Replace,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabKeeperSettings {
    #[serde(default)]
    pub reconcile_policy: ReconcilePolicy,
}

impl TabKeeperSettings {
    /// Load settings from persistent storage; absent or unreadable values
    /// fall back to defaults.
    pub fn load(storage: &dyn StateStore) -> Self {
        match storage.get_raw(SETTINGS_STATE_KEY) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("Discarding unreadable settings: {err}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
