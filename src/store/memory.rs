//! In-memory settings cache

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::bridge::BridgeError;

use super::SettingsStore;

/// Settings cache held in process memory.
///
/// Clones share the same entries, so a handle kept outside the bridge
/// observes every write. Used by tests and by embedders that do not want
/// persistence across restarts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
