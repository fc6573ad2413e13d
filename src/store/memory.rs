//! In-memory `SettingsStore`, used when no database path is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::DatabaseError;
use crate::store::traits::SettingsStore;

/// Settings held in a map keyed by `(scope, key)`. Lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<(String, String), serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across all scopes.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_setting(
        &self,
        scope: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DatabaseError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&(scope.to_string(), key.to_string())).cloned())
    }

    async fn set_setting(
        &self,
        scope: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), DatabaseError> {
        let mut entries = self.entries.write().await;
        entries.insert((scope.to_string(), key.to_string()), value.clone());
        Ok(())
    }

    async fn delete_setting(&self, scope: &str, key: &str) -> Result<bool, DatabaseError> {
        let mut entries = self.entries.write().await;
        Ok(entries
            .remove(&(scope.to_string(), key.to_string()))
            .is_some())
    }
}
