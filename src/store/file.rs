//! File-backed settings cache

use std::io;
use std::path::PathBuf;

use tokio::fs;

use crate::bridge::BridgeError;
use crate::platform::cache_dir;

use super::SettingsStore;

/// Settings cache persisted as one file per key under a cache directory.
///
/// The raw string is written whole on every set. Reading an absent key
/// reports an empty cache rather than an error; every other I/O failure
/// surfaces as a store error for the caller to observe.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store rooted at the platform cache directory.
    pub fn open_default() -> Self {
        Self::new(cache_dir())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SettingsStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        match fs::read_to_string(self.entry_path(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BridgeError::Store(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(BridgeError::Store)?;
        fs::write(self.entry_path(key), value)
            .await
            .map_err(BridgeError::Store)?;
        Ok(())
    }
}
