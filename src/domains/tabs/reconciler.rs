use crate::domains::git::watcher::BranchTransition;
use crate::domains::settings::ReconcilePolicy;
use crate::domains::tabs::enumerator;
use crate::domains::tabs::store::BranchTabStore;
use crate::domains::tabs::view::SavedTabsTreeProvider;
use crate::shared::editor_gateway::{EditorGateway, OpenOptions};
use crate::shared::prompt_gateway::PromptGateway;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How the target open-set for the incoming branch is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadChoice {
    UseNewBranchSaved,
    UsePreviousBranchSaved,
    Combine,
    DoNothing,
}

/// What one handled transition actually did; feeds the host event bridge
/// and keeps the behavior assertable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOutcome {
    pub branch: String,
    pub saved_previous: bool,
    pub choice: LoadChoice,
    pub opened: Vec<PathBuf>,
    pub closed: usize,
    pub warnings: usize,
}

/// Handles one branch transition at a time: optionally saves the outgoing
/// branch's open files, asks how to populate the incoming branch's tab set,
/// and converges the editor toward that target.
///
/// Serialization is structural: the activation loop is the sole consumer of
/// the transition queue and awaits `handle_transition` to completion before
/// taking the next one, so overlapping prompts and interleaved store writes
/// cannot occur.
pub struct TabReconciler {
    store: Arc<BranchTabStore>,
    editor: Arc<dyn EditorGateway>,
    prompts: Arc<dyn PromptGateway>,
    view: Arc<SavedTabsTreeProvider>,
    policy: ReconcilePolicy,
}

impl TabReconciler {
    pub fn new(
        store: Arc<BranchTabStore>,
        editor: Arc<dyn EditorGateway>,
        prompts: Arc<dyn PromptGateway>,
        view: Arc<SavedTabsTreeProvider>,
        policy: ReconcilePolicy,
    ) -> Self {
        Self {
            store,
            editor,
            prompts,
            view,
            policy,
        }
    }

    pub async fn handle_transition(&self, transition: &BranchTransition) -> ReconcileOutcome {
        let previous = transition.previous.as_deref();
        let current = transition.current.as_str();
        log::info!(
            "Handling branch transition {} -> '{current}'",
            previous.map_or_else(|| "<none>".to_string(), |p| format!("'{p}'"))
        );

        let saved_previous = match previous {
            Some(prev) => self.maybe_save_previous(prev, current).await,
            None => false,
        };

        let choice = self.prompt_load_choice(previous, current).await;
        let Some(target) = self.target_paths(choice, previous, current) else {
            log::debug!("Leaving open tabs untouched for '{current}'");
            return ReconcileOutcome {
                branch: current.to_string(),
                saved_previous,
                choice,
                opened: Vec::new(),
                closed: 0,
                warnings: 0,
            };
        };

        let (opened, closed, warnings) = self.converge(&target).await;
        ReconcileOutcome {
            branch: current.to_string(),
            saved_previous,
            choice,
            opened,
            closed,
            warnings,
        }
    }

    /// Step 1: offer to save the outgoing branch's open files. Declining or
    /// dismissing the prompt skips the save without error.
    async fn maybe_save_previous(&self, previous: &str, current: &str) -> bool {
        let message = format!(
            "Do you want to save open tabs for \"{previous}\" before switching to \"{current}\"?"
        );
        if self.prompts.confirm(&message).await != Some(true) {
            log::debug!("Not saving tabs for '{previous}'");
            return false;
        }

        let paths = enumerator::current_open_paths(self.editor.as_ref()).await;
        log::info!("Saving {} open tab(s) for '{previous}'", paths.len());
        match self.store.save(previous, paths) {
            Ok(()) => {
                self.view.refresh();
                true
            }
            Err(err) => {
                log::warn!("Failed to save tabs for '{previous}': {err}");
                self.prompts
                    .show_warning(&format!("Could not save tabs for \"{previous}\": {err}"))
                    .await;
                false
            }
        }
    }

    /// Step 2: one picker decides which stored entries populate the target
    /// set. A dismissed picker means "do nothing".
    async fn prompt_load_choice(&self, previous: Option<&str>, current: &str) -> LoadChoice {
        let mut options = vec!["Load saved tabs for this branch".to_string()];
        let mut mapping = vec![LoadChoice::UseNewBranchSaved];
        if let Some(previous) = previous {
            options.push(format!("Load tabs from \"{previous}\""));
            mapping.push(LoadChoice::UsePreviousBranchSaved);
        }
        options.push("Combine both".to_string());
        mapping.push(LoadChoice::Combine);
        options.push("Do nothing".to_string());
        mapping.push(LoadChoice::DoNothing);

        let placeholder = format!("Do you want to load tabs for \"{current}\"?");
        match self.prompts.pick(&placeholder, &options).await {
            Some(index) => mapping
                .get(index)
                .copied()
                .unwrap_or(LoadChoice::DoNothing),
            None => LoadChoice::DoNothing,
        }
    }

    /// `None` short-circuits convergence (the current open set already is
    /// the target).
    fn target_paths(
        &self,
        choice: LoadChoice,
        previous: Option<&str>,
        current: &str,
    ) -> Option<Vec<PathBuf>> {
        match choice {
            LoadChoice::UseNewBranchSaved => Some(self.store.get(current)),
            LoadChoice::UsePreviousBranchSaved => {
                Some(previous.map(|p| self.store.get(p)).unwrap_or_default())
            }
            LoadChoice::Combine => {
                let mut seen = HashSet::new();
                let mut union = Vec::new();
                let previous_paths = previous.map(|p| self.store.get(p)).unwrap_or_default();
                for path in self.store.get(current).into_iter().chain(previous_paths) {
                    if seen.insert(path.clone()) {
                        union.push(path);
                    }
                }
                Some(union)
            }
            LoadChoice::DoNothing => None,
        }
    }

    /// Steps 3-4: drive the editor toward the target set. Every failure is
    /// a warning, never an abort; remaining paths are still processed.
    async fn converge(&self, target: &[PathBuf]) -> (Vec<PathBuf>, usize, usize) {
        let open = enumerator::current_open_paths(self.editor.as_ref()).await;
        let mut warnings = 0;

        let mut closed = 0;
        if self.policy == ReconcilePolicy::Replace {
            let target_set: HashSet<&Path> = target.iter().map(PathBuf::as_path).collect();
            for path in &open {
                if target_set.contains(path.as_path()) {
                    continue;
                }
                match self.editor.close_path(path).await {
                    Ok(()) => closed += 1,
                    Err(err) => {
                        log::warn!("Failed to close '{}': {err}", path.display());
                        warnings += 1;
                    }
                }
            }
        }

        let already_open: HashSet<PathBuf> = open.into_iter().collect();
        let mut opened = Vec::new();
        for path in target {
            if already_open.contains(path) {
                continue;
            }
            match self
                .editor
                .open_path(path, OpenOptions::default())
                .await
            {
                Ok(()) => opened.push(path.clone()),
                Err(err) => {
                    log::warn!("Failed to open '{}': {err}", path.display());
                    self.prompts
                        .show_warning(&format!("File not found: {}", path.display()))
                        .await;
                    warnings += 1;
                }
            }
        }

        (opened, closed, warnings)
    }
}
