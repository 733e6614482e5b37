//! Session key-value stores that hold the access token.

use crate::paths::CampusPaths;
use async_trait::async_trait;
use campus_core::error::Result;
use campus_core::submission::CredentialStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Key under which the bearer token is stored.
pub const ACCESS_TOKEN_KEY: &str = "access-token";

/// Session store backed by a flat JSON object on disk.
///
/// Read-only: the login flow writes the file, this side only reads it.
/// A missing or unreadable file is treated as "no token".
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    /// Creates a store for the default path (~/.config/campus/session.json).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: CampusPaths::session_file()?,
        })
    }

    /// Creates a store for a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads one value from the store.
    pub async fn get_item(&self, key: &str) -> Option<String> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(
                    "[SessionStore] Cannot read {}: {}",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                tracing::warn!(
                    "[SessionStore] Ignoring malformed session file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }
}

#[async_trait]
impl CredentialStore for JsonSessionStore {
    async fn get_token(&self) -> Option<String> {
        self.get_item(ACCESS_TOKEN_KEY).await
    }
}

/// Session store kept in memory.
#[derive(Default)]
pub struct InMemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(ACCESS_TOKEN_KEY.to_string(), token.into());
        Self {
            values: RwLock::new(values),
        }
    }

    pub async fn set_item(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().await.insert(key.into(), value.into());
    }

    pub async fn remove_item(&self, key: &str) {
        self.values.write().await.remove(key);
    }
}

#[async_trait]
impl CredentialStore for InMemorySessionStore {
    async fn get_token(&self) -> Option<String> {
        self.values.read().await.get(ACCESS_TOKEN_KEY).cloned()
    }
}
