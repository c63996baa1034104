use crate::errors::TabKeeperError;
use crate::shared::state_store::StateStore;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`StateStore`] for tests and for hosts that bridge their own
/// persistent storage and only need the port's shape.
#[derive(Default)]
pub struct MemoryStateStore {
    values: Mutex<HashMap<String, String>>,
}

impl StateStore for MemoryStateStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        match self.values.lock() {
            Ok(values) => values.get(key).cloned(),
            Err(poisoned) => poisoned.into_inner().get(key).cloned(),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), TabKeeperError> {
        let mut values = match self.values.lock() {
            Ok(values) => values,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
