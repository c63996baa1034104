use crate::domains::git::watcher::BranchWatcher;
use crate::domains::settings::TabKeeperSettings;
use crate::domains::tabs::reconciler::TabReconciler;
use crate::domains::tabs::store::BranchTabStore;
use crate::domains::tabs::view::SavedTabsTreeProvider;
use crate::infrastructure::events::{
    emit_event, BranchTransitionPayload, HostEvent, SavedTabsRefreshedPayload, TabKeeperEvent,
};
use crate::shared::editor_gateway::EditorGateway;
use crate::shared::prompt_gateway::PromptGateway;
use crate::shared::state_store::StateStore;
use crate::shared::vcs_gateway::VcsGateway;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Everything the host environment provides.
pub struct ExtensionHost {
    pub vcs: Arc<dyn VcsGateway>,
    pub editor: Arc<dyn EditorGateway>,
    pub prompts: Arc<dyn PromptGateway>,
    pub storage: Arc<dyn StateStore>,
}

/// Live extension instance returned by [`activate`]. Dropping it (or
/// calling [`ActivationHandle::deactivate`]) stops branch handling; no
/// further cleanup is performed.
pub struct ActivationHandle {
    store: Arc<BranchTabStore>,
    view: Arc<SavedTabsTreeProvider>,
    events: broadcast::Sender<HostEvent>,
    task: JoinHandle<()>,
}

impl ActivationHandle {
    pub fn store(&self) -> Arc<BranchTabStore> {
        self.store.clone()
    }

    pub fn saved_tabs_view(&self) -> Arc<SavedTabsTreeProvider> {
        self.view.clone()
    }

    /// Bridge stream of named events for the host's event surface.
    pub fn subscribe_events(&self) -> broadcast::Receiver<HostEvent> {
        self.events.subscribe()
    }

    pub fn deactivate(self) {
        self.task.abort();
    }
}

impl Drop for ActivationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Wire the components together and start the event loop: await repository
/// discovery, await the initial branch resolution, then hand each branch
/// transition to the reconciler, one at a time.
///
/// Initialization failure is surfaced once as an error notification and
/// leaves the extension loaded but inert.
pub fn activate(host: ExtensionHost) -> ActivationHandle {
    let store = Arc::new(BranchTabStore::load(host.storage.clone()));
    let settings = TabKeeperSettings::load(host.storage.as_ref());
    let view = Arc::new(SavedTabsTreeProvider::new(store.clone()));
    let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

    let reconciler = TabReconciler::new(
        store.clone(),
        host.editor,
        host.prompts.clone(),
        view.clone(),
        settings.reconcile_policy,
    );

    let task = tokio::spawn(run_event_loop(
        host.vcs,
        host.prompts,
        reconciler,
        events.clone(),
    ));

    ActivationHandle {
        store,
        view,
        events,
        task,
    }
}

async fn run_event_loop(
    vcs: Arc<dyn VcsGateway>,
    prompts: Arc<dyn PromptGateway>,
    reconciler: TabReconciler,
    events: broadcast::Sender<HostEvent>,
) {
    let mut watcher = match BranchWatcher::subscribe(vcs).await {
        Ok(watcher) => watcher,
        Err(err) => {
            log::error!("Activation failed: {err}");
            prompts
                .show_error(&format!("Tab Keeper error: {err}"))
                .await;
            return;
        }
    };

    while let Some(transition) = watcher.next_transition().await {
        if let Err(err) = emit_event(
            &events,
            TabKeeperEvent::BranchTransition,
            &BranchTransitionPayload {
                previous: transition.previous.clone(),
                current: transition.current.clone(),
            },
        ) {
            log::warn!("Failed to serialize transition event: {err}");
        }

        let outcome = reconciler.handle_transition(&transition).await;

        if outcome.saved_previous {
            if let Some(previous) = transition.previous.clone() {
                let _ = emit_event(
                    &events,
                    TabKeeperEvent::SavedTabsRefreshed,
                    &SavedTabsRefreshedPayload { branch: previous },
                );
            }
        }
        if let Err(err) = emit_event(&events, TabKeeperEvent::ReconcileCompleted, &outcome) {
            log::warn!("Failed to serialize reconcile event: {err}");
        }
    }

    log::info!("Branch transition stream closed; extension idle");
}
