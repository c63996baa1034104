pub mod editor_gateway;
pub mod prompt_gateway;
pub mod state_store;
pub mod vcs_gateway;

pub use editor_gateway::{EditorGateway, OpenOptions, OpenTab, FILE_SCHEME};
pub use prompt_gateway::PromptGateway;
pub use state_store::StateStore;
pub use vcs_gateway::{RepositoryHandle, VcsGateway};
