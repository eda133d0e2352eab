//! Bridge settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::platform::settings_path;

/// Default SetPebble service endpoint.
pub const DEFAULT_BASE_URL: &str = "http://x.SetPebble.com";

/// Default integration token within the service namespace.
pub const DEFAULT_TOKEN: &str = "WUMT";

/// Bridge settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the SetPebble service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Integration token naming this watch app within the service
    #[serde(default = "default_token")]
    pub token: String,

    /// Fixed account identifier. When absent, one is generated and
    /// persisted on first run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_token: Option<String>,

    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: default_token(),
            account_token: None,
            debug: false,
        }
    }
}

impl Settings {
    /// Load settings from the default config location.
    pub async fn load() -> Result<Self> {
        Self::load_from(&settings_path()).await
    }

    /// Load settings from a specific file, falling back to defaults when it
    /// does not exist.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Settings file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .context("Failed to read settings file")?;

        let settings: Settings =
            toml::from_str(&content).context("Failed to parse settings file")?;

        Ok(settings)
    }

    /// Save settings to a specific file, creating parent directories as
    /// needed.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        tokio::fs::write(path, content)
            .await
            .context("Failed to write settings file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "http://x.SetPebble.com");
        assert_eq!(settings.token, "WUMT");
        assert_eq!(settings.account_token, None);
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings {
            base_url: "http://localhost:9090".to_string(),
            token: "ABCD".to_string(),
            account_token: Some("8d6f5b2a9c1e4f70".to_string()),
            debug: true,
        };

        let toml_str = toml::to_string(&settings).unwrap();
        assert!(toml_str.contains("http://localhost:9090"));
        assert!(toml_str.contains("ABCD"));
        assert!(toml_str.contains("8d6f5b2a9c1e4f70"));
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let settings: Settings = toml::from_str(r#"token = "ABCD""#).unwrap();
        assert_eq!(settings.token, "ABCD");
        assert_eq!(settings.base_url, "http://x.SetPebble.com");
        assert!(!settings.debug);
    }

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.toml"))
            .await
            .unwrap();
        assert_eq!(settings.token, "WUMT");
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join("settings.toml");

        let settings = Settings {
            base_url: "http://localhost:9090".to_string(),
            token: "ABCD".to_string(),
            account_token: None,
            debug: true,
        };
        settings.save_to(&path).await.unwrap();

        let loaded = Settings::load_from(&path).await.unwrap();
        assert_eq!(loaded.base_url, settings.base_url);
        assert_eq!(loaded.token, settings.token);
        assert!(loaded.debug);
    }
}
