//! Typed view over a `SettingsStore` key.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DatabaseError;
use crate::store::traits::SettingsStore;

/// Reads and writes one JSON-serialized value per conversation.
pub struct StateAccessor<T> {
    store: Arc<dyn SettingsStore>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for StateAccessor<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> StateAccessor<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn SettingsStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub async fn get(&self, conversation: &str) -> Result<Option<T>, DatabaseError> {
        match self.store.get_setting(conversation, &self.key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| DatabaseError::Serialization(format!("{}: {e}", self.key))),
            None => Ok(None),
        }
    }

    pub async fn set(&self, conversation: &str, value: &T) -> Result<(), DatabaseError> {
        let value = serde_json::to_value(value)
            .map_err(|e| DatabaseError::Serialization(format!("{}: {e}", self.key)))?;
        self.store.set_setting(conversation, &self.key, &value).await
    }

    pub async fn delete(&self, conversation: &str) -> Result<bool, DatabaseError> {
        self.store.delete_setting(conversation, &self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::UserProfile;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn typed_roundtrip_through_store() {
        let store: Arc<dyn SettingsStore> = Arc::new(MemoryStore::new());
        let accessor: StateAccessor<UserProfile> = StateAccessor::new(store, "user_profile");

        assert!(accessor.get("cli:alice").await.unwrap().is_none());

        let profile = UserProfile::new().with_name("Alice");
        accessor.set("cli:alice", &profile).await.unwrap();
        assert_eq!(accessor.get("cli:alice").await.unwrap(), Some(profile));

        assert!(accessor.delete("cli:alice").await.unwrap());
        assert!(accessor.get("cli:alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_value_is_a_serialization_error() {
        let store: Arc<dyn SettingsStore> = Arc::new(MemoryStore::new());
        store
            .set_setting("cli:alice", "user_profile", &serde_json::json!({"name": 42}))
            .await
            .unwrap();

        let accessor: StateAccessor<UserProfile> = StateAccessor::new(store, "user_profile");
        let err = accessor.get("cli:alice").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Serialization(_)));
    }
}
