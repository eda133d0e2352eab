//! Platform directory resolution for the bridge's on-disk state.
//!
//! The bridge keeps three things on disk: its settings file, the persisted
//! account token, and the last-received settings payload. All of them live
//! under the platform's conventional per-user directories, with a
//! relative-path fallback when those cannot be resolved.

use std::path::PathBuf;

/// Get the configuration directory (settings file, account token).
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "setpebble", "bridge")
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".setpebble-bridge").join("config"))
}

/// Get the cache directory for last-received settings payloads.
pub fn cache_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "setpebble", "bridge")
        .map(|d| d.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".setpebble-bridge").join("cache"))
}

/// Get the path to the settings file.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Get the path to the persisted account token.
pub fn account_token_path() -> PathBuf {
    config_dir().join("account-token")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_named_for_bridge() {
        let path = config_dir();
        assert!(path.to_string_lossy().contains("bridge"));
    }

    #[test]
    fn test_cache_dir_named_for_bridge() {
        let path = cache_dir();
        assert!(path.to_string_lossy().contains("bridge"));
    }

    #[test]
    fn test_settings_path_under_config_dir() {
        let path = settings_path();
        assert!(path.starts_with(config_dir()));
        assert!(path.to_string_lossy().ends_with("settings.toml"));
    }

    #[test]
    fn test_account_token_path_under_config_dir() {
        let path = account_token_path();
        assert!(path.starts_with(config_dir()));
        assert!(path.to_string_lossy().ends_with("account-token"));
    }
}
