use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize, Clone)]
#[serde(tag = "type", content = "data")]
pub enum TabKeeperError {
    VcsUnavailable {
        message: String,
    },
    GitOperationFailed {
        operation: String,
        message: String,
    },
    StorageFailure {
        operation: String,
        key: String,
        message: String,
    },
    WatcherFailed {
        path: String,
        message: String,
    },
}

impl TabKeeperError {
    pub fn vcs(error: impl ToString) -> Self {
        TabKeeperError::VcsUnavailable {
            message: error.to_string(),
        }
    }

    pub fn git(operation: &str, error: impl ToString) -> Self {
        TabKeeperError::GitOperationFailed {
            operation: operation.to_string(),
            message: error.to_string(),
        }
    }

    pub fn storage(operation: &str, key: impl ToString, error: impl ToString) -> Self {
        TabKeeperError::StorageFailure {
            operation: operation.to_string(),
            key: key.to_string(),
            message: error.to_string(),
        }
    }

    pub fn watcher(path: impl ToString, error: impl ToString) -> Self {
        TabKeeperError::WatcherFailed {
            path: path.to_string(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for TabKeeperError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::VcsUnavailable { message } => {
                write!(f, "Version control integration unavailable: {message}")
            }
            Self::GitOperationFailed { operation, message } => {
                write!(f, "Git operation '{operation}' failed: {message}")
            }
            Self::StorageFailure {
                operation,
                key,
                message,
            } => {
                write!(f, "Storage '{operation}' failed for key '{key}': {message}")
            }
            Self::WatcherFailed { path, message } => {
                write!(f, "Failed to watch '{path}': {message}")
            }
        }
    }
}

impl std::error::Error for TabKeeperError {}

impl From<TabKeeperError> for String {
    fn from(error: TabKeeperError) -> Self {
        error.to_string()
    }
}
