use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime settings for a [`BoardStore`](crate::store::BoardStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Blob store key; the suffix is the board schema version
    pub storage_key: String,
    /// Column whose growth raises the "new item" pulse
    pub pulse_column: String,
    pub pulse_duration_ms: u64,
    /// Write the loaded board back right after opening
    pub persist_on_open: bool,
}

impl StoreConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "kanban:board:v1";

    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.pulse_duration_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            pulse_column: "todo".to_string(),
            pulse_duration_ms: 2200,
            persist_on_open: true,
        }
    }
}
