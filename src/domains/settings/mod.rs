pub mod types;

pub use types::{ReconcilePolicy, TabKeeperSettings, SETTINGS_STATE_KEY};
