//! Account token persistence
//!
//! The phone runtime the original companion lived in hands out the account
//! identifier natively. Standalone, the bridge provisions its own: created
//! on first run, persisted to the config directory, reused on every run
//! after that.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

use crate::platform::account_token_path;

/// Per-install account identifier presented to the SetPebble service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AccountToken {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Timestamp when the identifier was created
    pub created_at: u64,
}

impl AccountToken {
    /// Create a new account token.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
        }
    }

    /// Hex form without separators, the shape the service expects in URL
    /// segments.
    pub fn as_str(&self) -> String {
        self.id.simple().to_string()
    }
}

impl Default for AccountToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Get or create the persisted account token.
///
/// Creates a new token on first run and returns the existing one on
/// subsequent runs. An unreadable token file is replaced with a fresh one.
pub async fn get_or_create_account_token() -> Result<AccountToken> {
    let path = account_token_path();

    if path.exists() {
        match load_account_token(&path).await {
            Ok(token) => {
                tracing::debug!(account = %token.as_str(), "Loaded existing account token");
                return Ok(token);
            }
            Err(e) => {
                tracing::warn!("Failed to load account token, creating new one: {}", e);
            }
        }
    }

    let token = AccountToken::new();
    save_account_token(&path, &token).await?;

    tracing::info!(account = %token.as_str(), "Created new account token");
    Ok(token)
}

/// Load the account token from a file.
async fn load_account_token(path: &Path) -> Result<AccountToken> {
    let bytes = fs::read(path)
        .await
        .context("Failed to read account token file")?;

    let token: AccountToken =
        serde_json::from_slice(&bytes).context("Failed to parse account token")?;

    Ok(token)
}

/// Save the account token to a file.
async fn save_account_token(path: &Path, token: &AccountToken) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .context("Failed to create config directory")?;
    }

    let json =
        serde_json::to_string_pretty(token).context("Failed to serialize account token")?;

    fs::write(path, json)
        .await
        .context("Failed to write account token file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_account_token_creation() {
        let token = AccountToken::new();
        assert!(!token.id.is_nil());
        assert!(token.created_at > 0);
    }

    #[test]
    fn test_as_str_is_bare_hex() {
        let token = AccountToken::new();
        let s = token.as_str();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_account_token_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("account-token");

        let original = AccountToken::new();
        save_account_token(&path, &original).await.unwrap();

        let loaded = load_account_token(&path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[tokio::test]
    async fn test_corrupt_token_file_fails_to_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("account-token");
        fs::write(&path, "not json").await.unwrap();

        assert!(load_account_token(&path).await.is_err());
    }
}
