use async_trait::async_trait;

/// Host user-interaction surface: modal confirmations, single-choice pickers
/// and non-blocking notifications.
///
/// A dismissed dialog is an input value, not an error, so both prompt
/// operations return `Option` and the caller maps `None` to its own default.
/// Prompts have no timeout; a call may stay pending indefinitely.
#[async_trait]
pub trait PromptGateway: Send + Sync {
    /// Modal yes/no question. `None` means the dialog was dismissed.
    async fn confirm(&self, message: &str) -> Option<bool>;

    /// Single-choice picker over `options`; returns the chosen index, or
    /// `None` when dismissed without a choice.
    async fn pick(&self, placeholder: &str, options: &[String]) -> Option<usize>;

    /// Non-blocking warning notification.
    async fn show_warning(&self, message: &str);

    /// Non-blocking error notification.
    async fn show_error(&self, message: &str);
}
