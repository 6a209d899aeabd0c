//! Storage layer for BITA
//!
//! This crate provides the local key-value persistence the app keeps
//! between launches: a sled-backed store for devices and an in-memory
//! store for tests and ephemeral sessions. Both sit behind the
//! [`KeyValueStorage`] trait so callers never depend on a backend.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use kv::{KvConfig, KvStore};
pub use memory::MemoryStorage;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Stored bytes are not valid UTF-8
    #[error("Invalid encoding for key {key}: {source}")]
    InvalidEncoding {
        /// Key whose value failed to decode
        key: String,
        /// Underlying decode error
        source: std::string::FromUtf8Error,
    },

    /// Backend cannot serve requests
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Asynchronous string key-value storage
///
/// Values are opaque strings; callers own their encoding.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`, returning whether a value was present
    async fn remove_item(&self, key: &str) -> Result<bool>;
}
