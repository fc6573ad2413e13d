//! `SettingsStore` trait — the single async interface for dialog persistence.

use async_trait::async_trait;

use crate::error::DatabaseError;

/// Backend-agnostic key/value store for JSON settings.
///
/// Every entry is scoped by a conversation key so that two conversations
/// never see each other's profile or dialog state.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Get a setting, or `None` if it was never set (or was deleted).
    async fn get_setting(
        &self,
        scope: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DatabaseError>;

    /// Insert or replace a setting.
    async fn set_setting(
        &self,
        scope: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), DatabaseError>;

    /// Delete a setting. Returns whether anything was removed.
    async fn delete_setting(&self, scope: &str, key: &str) -> Result<bool, DatabaseError>;
}
