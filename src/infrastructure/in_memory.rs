use crate::domain::ports::KeyValueStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory key-value store.
///
/// Uses `Arc<RwLock<HashMap<String, String>>>` to allow shared concurrent
/// access. The default store for tests and ephemeral sessions.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = InMemoryStore::new();

        store
            .set("lastTopupTransaction", "{\"id\":\"TXN-1\"}".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get("lastTopupTransaction").await.unwrap().as_deref(),
            Some("{\"id\":\"TXN-1\"}")
        );

        store.remove("lastTopupTransaction").await.unwrap();
        assert!(store.get("lastTopupTransaction").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = InMemoryStore::new();
        store.set("k", "a".to_string()).await.unwrap();
        store.set("k", "b".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = InMemoryStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
        // Removing a missing key is not an error.
        store.remove("nope").await.unwrap();
    }
}
