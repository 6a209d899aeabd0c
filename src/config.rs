//! Application configuration
//!
//! Built with builder methods or read from `BITA_*` environment variables.

use std::path::Path;
use storage::KvConfig;

/// Environment variable naming the data directory
pub const DATA_DIR_ENV: &str = "BITA_DATA_DIR";
/// Environment variable holding the default log filter
pub const LOG_LEVEL_ENV: &str = "BITA_LOG_LEVEL";
/// Environment variable enabling JSON log output
pub const LOG_JSON_ENV: &str = "BITA_LOG_JSON";

const KV_FILE_NAME: &str = "bita_kv.db";

/// Where the session is persisted
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// On-disk sled database
    Sled(KvConfig),
    /// Process memory; nothing survives a restart
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::Sled(KvConfig::default())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Session storage backend
    pub storage: StorageBackend,
    /// Logging setup
    pub log: LogConfig,
}

impl AppConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through a variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_ENV) {
            config = config.data_dir(dir);
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            config = config.log_level(level);
        }
        if let Some(json) = lookup(LOG_JSON_ENV) {
            config = config.json_logs(matches!(json.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));
        }

        config
    }

    /// Persist the session under a data directory
    pub fn data_dir(self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(KV_FILE_NAME);
        self.storage(StorageBackend::Sled(KvConfig::new(path.to_string_lossy())))
    }

    /// Set the storage backend
    pub fn storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    /// Set the default log filter
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log.level = level.into();
        self
    }

    /// Enable or disable JSON logs
    pub fn json_logs(mut self, enabled: bool) -> Self {
        self.log.json = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.log, LogConfig::default());
        assert!(matches!(config.storage, StorageBackend::Sled(ref kv) if kv.path == KV_FILE_NAME));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (DATA_DIR_ENV, "/var/lib/bita"),
            (LOG_LEVEL_ENV, "debug"),
            (LOG_JSON_ENV, "TRUE"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);
        match config.storage {
            StorageBackend::Sled(kv) => assert_eq!(kv.path, "/var/lib/bita/bita_kv.db"),
            StorageBackend::Memory => panic!("expected sled backend"),
        }
    }

    #[test]
    fn test_from_empty_lookup() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.log.level, "info");
        assert!(!config.log.json);
    }
}
