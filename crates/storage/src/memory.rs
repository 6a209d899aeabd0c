//! Process-local storage
//!
//! Nothing written here outlives the process. Clones share the same map,
//! which lets tests simulate an app restart by building a fresh consumer
//! over a clone of the same storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{KeyValueStorage, Result};

/// In-memory key-value storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty().await);

        storage.set_item("user", "a").await.unwrap();
        storage.set_item("user", "b").await.unwrap();
        assert_eq!(storage.get_item("user").await.unwrap(), Some("b".to_string()));
        assert_eq!(storage.len().await, 1);

        assert!(storage.remove_item("user").await.unwrap());
        assert!(!storage.remove_item("user").await.unwrap());
        assert_eq!(storage.get_item("user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("user", "shared").await.unwrap();

        assert_eq!(other.get_item("user").await.unwrap(), Some("shared".to_string()));
    }
}
