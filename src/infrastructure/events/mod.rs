use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events the host bridge forwards to its own event surface. Names are
/// stable identifiers; payloads are serialized separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TabKeeperEvent {
    BranchTransition,
    SavedTabsRefreshed,
    ReconcileCompleted,
}

impl TabKeeperEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabKeeperEvent::BranchTransition => "tabkeeper:branch-transition",
            TabKeeperEvent::SavedTabsRefreshed => "tabkeeper:saved-tabs-refreshed",
            TabKeeperEvent::ReconcileCompleted => "tabkeeper:reconcile-completed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchTransitionPayload {
    pub previous: Option<String>,
    pub current: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTabsRefreshedPayload {
    pub branch: String,
}

/// A named event plus its serialized payload, ready for the host bridge.
#[derive(Debug, Clone)]
pub struct HostEvent {
    pub name: &'static str,
    pub payload: serde_json::Value,
}

/// Serialize `payload` and publish it on the bridge channel. A channel
/// without subscribers drops the event silently; only serialization can
/// fail.
pub fn emit_event<T: Serialize>(
    channel: &broadcast::Sender<HostEvent>,
    event: TabKeeperEvent,
    payload: &T,
) -> Result<(), serde_json::Error> {
    let payload = serde_json::to_value(payload)?;
    let _ = channel.send(HostEvent {
        name: event.as_str(),
        payload,
    });
    Ok(())
}
