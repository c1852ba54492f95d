pub mod file;
pub mod memory;
pub mod redis;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use crate::config::{Config, StorageBackend};
use crate::error::{AppError, Result};

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

pub const IDEAS_KEY: &str = "ideas";
pub const COMMENTS_KEY: &str = "comments";
pub const VOTES_KEY: &str = "votes";
pub const REVIEWS_KEY: &str = "reviews";

/// Byte-oriented key-value medium. Implementations report every failure;
/// absorbing them is the job of [`BlobStore`].
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// Stand-in for a missing backing medium.
#[derive(Debug, Clone, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(AppError::Unavailable("no storage medium configured".to_string()))
    }

    fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
        Err(AppError::Unavailable("no storage medium configured".to_string()))
    }
}

/// Reads and writes whole record collections as JSON arrays.
///
/// `try_read`/`try_write` report what went wrong; `read`/`write` never fail:
/// an unreadable collection is empty and a failed write only lives on in memory.
#[derive(Clone)]
pub struct BlobStore {
    backend: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl BlobStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn KeyValueStore> = match config.storage_backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::new(&config.data_dir)),
            StorageBackend::Redis => Arc::new(RedisStore::open(&config.redis_url)?),
            StorageBackend::None => Arc::new(UnavailableStore),
        };
        Ok(Self::new(backend).with_prefix(config.key_prefix.clone()))
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    pub fn try_read<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.backend.get(&self.full_key(key))? {
            Some(bytes) if !bytes.is_empty() => Ok(serde_json::from_slice(&bytes)?),
            _ => Ok(Vec::new()),
        }
    }

    pub fn try_write<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec(records)?;
        self.backend.set(&self.full_key(key), &bytes)
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.try_read(key) {
            Ok(records) => records,
            Err(e) if e.is_medium_failure() => {
                tracing::warn!("Storage unavailable reading {}, treating as empty: {}", key, e);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable collection {}: {}", key, e);
                Vec::new()
            }
        }
    }

    pub fn write<T: Serialize>(&self, key: &str, records: &[T]) {
        if let Err(e) = self.try_write(key, records) {
            tracing::warn!(
                "Failed to persist {} ({} records), keeping in memory only: {}",
                key,
                records.len(),
                e
            );
        }
    }
}
