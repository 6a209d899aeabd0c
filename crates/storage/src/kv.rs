//! Key-value store backed by sled
//!
//! Values are kept as raw UTF-8 bytes so a corrupted entry can be
//! detected by the caller instead of being rejected here.

use async_trait::async_trait;
use sled::Db;
use std::sync::Arc;

use crate::{KeyValueStorage, Result, StorageError};

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for flush on every write only)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "bita_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Key-value store implementation
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl KvStore {
    /// Open (or create) a key-value store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression)
            .flush_every_ms(config.flush_every_ms)
            .open()?;

        tracing::debug!(path = %config.path, "Opened key-value store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create a temporary key-value store (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get the raw string stored under a key
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|source| StorageError::InvalidEncoding { key: key.to_string(), source }),
            None => Ok(None),
        }
    }

    /// Set a raw string under a key
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    /// Remove a value by key
    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    /// Flush pending writes to disk
    pub async fn flush(&self) -> Result<()> {
        self.db.flush_async().await?;
        Ok(())
    }

    /// Get the number of keys in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

#[async_trait]
impl KeyValueStorage for KvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.get(key)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, value)?;
        self.flush().await
    }

    async fn remove_item(&self, key: &str) -> Result<bool> {
        let removed = self.remove(key)?;
        self.flush().await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kv_store_creation() {
        let kv = KvStore::in_memory().unwrap();
        assert!(kv.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let kv = KvStore::in_memory().unwrap();

        kv.set("user", r#"{"name":"Ann"}"#).unwrap();

        assert_eq!(kv.get("user").unwrap(), Some(r#"{"name":"Ann"}"#.to_string()));
        assert_eq!(kv.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let kv = KvStore::in_memory().unwrap();
        assert_eq!(kv.get("nonexistent").unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_item_reports_presence() {
        let kv = KvStore::in_memory().unwrap();
        assert!(!kv.remove_item("user").await.unwrap());

        kv.set_item("user", "payload").await.unwrap();
        assert!(kv.remove_item("user").await.unwrap());
        assert!(kv.is_empty());

        // Nothing left to remove
        assert!(!kv.remove_item("user").await.unwrap());
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let kv = KvStore::in_memory().unwrap();
        kv.db.insert("user", &[0xff, 0xfe, 0x00][..]).unwrap();

        let err = kv.get("user").unwrap_err();
        assert!(matches!(err, StorageError::InvalidEncoding { ref key, .. } if key == "user"));
    }

    #[tokio::test]
    async fn test_trait_roundtrip() {
        let kv = KvStore::in_memory().unwrap();

        kv.set_item("user", "payload").await.unwrap();
        assert_eq!(kv.get_item("user").await.unwrap(), Some("payload".to_string()));

        assert!(kv.remove_item("user").await.unwrap());
        assert_eq!(kv.get_item("user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv.db").to_string_lossy().into_owned();

        {
            let kv = KvStore::new(KvConfig::new(path.clone()).flush_every_ms(None)).unwrap();
            kv.set_item("user", "persisted").await.unwrap();
        }

        let kv = KvStore::new(KvConfig::new(path).flush_every_ms(None)).unwrap();
        assert_eq!(kv.get_item("user").await.unwrap(), Some("persisted".to_string()));
    }

    #[test]
    fn test_reopen_config_keeps_defaults() {
        let config = KvConfig::new("session.db").flush_every_ms(None);
        let defaults = KvConfig::default();

        assert_eq!(config.path, "session.db");
        assert_eq!(config.flush_every_ms, None);
        assert_eq!(config.cache_capacity, defaults.cache_capacity);
        assert_eq!(config.use_compression, defaults.use_compression);
    }

    #[tokio::test]
    async fn test_removal_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv.db").to_string_lossy().into_owned();

        {
            let kv = KvStore::new(KvConfig::new(path.clone()).flush_every_ms(None)).unwrap();
            kv.set_item("user", "persisted").await.unwrap();
            assert!(kv.remove_item("user").await.unwrap());
        }

        let kv = KvStore::new(KvConfig::new(path).flush_every_ms(None)).unwrap();
        assert_eq!(kv.get_item("user").await.unwrap(), None);
    }
}
