use crate::errors::TabKeeperError;
use crate::shared::state_store::StateStore;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Durable key-value store over an embedded SQLite database. All access
/// happens from the single event-loop thread, so one mutex-held connection
/// is enough; there is no pooling.
pub struct SqliteStateStore {
    conn: Mutex<Connection>,
}

impl SqliteStateStore {
    pub fn new(path: &Path) -> Result<Self, TabKeeperError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TabKeeperError::storage("create-dir", parent.display(), e))?;
        }
        let conn = Connection::open(path)
            .map_err(|e| TabKeeperError::storage("open", path.display(), e))?;
        Self::from_connection(conn)
    }

    /// Store under the platform user-data directory
    /// (`<data_dir>/tabkeeper/state.db`).
    pub fn open_default() -> Result<Self, TabKeeperError> {
        let path = default_database_path().ok_or_else(|| {
            TabKeeperError::storage("resolve-path", "state.db", "no user data directory")
        })?;
        Self::new(&path)
    }

    /// Non-durable variant for tests and throwaway sessions.
    pub fn in_memory() -> Result<Self, TabKeeperError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| TabKeeperError::storage("open", ":memory:", e))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, TabKeeperError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS extension_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| TabKeeperError::storage("initialize", "extension_state", e))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("tabkeeper").join("state.db"))
}

impl StateStore for SqliteStateStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        let conn = self.lock_conn();
        let result = conn
            .query_row(
                "SELECT value FROM extension_state WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional();
        match result {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to read state key '{key}': {err}");
                None
            }
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), TabKeeperError> {
        let conn = self.lock_conn();
        conn.execute(
            "INSERT INTO extension_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e| TabKeeperError::storage("set", key, e))?;
        Ok(())
    }
}
