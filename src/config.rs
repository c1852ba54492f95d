use std::env;
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
    /// No backing medium at all; every read is empty and every write is dropped.
    None,
}

impl std::str::FromStr for StorageBackend {
    type Err = AppError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "redis" => Ok(StorageBackend::Redis),
            "none" => Ok(StorageBackend::None),
            other => Err(AppError::Config(format!("Unknown storage backend: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub redis_url: String,
    pub key_prefix: String,
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: String::new(),
            seed_demo_data: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.storage_backend,
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| AppError::Config(format!("Invalid SEED_DEMO_DATA: {}", value)))?,
            None => defaults.seed_demo_data,
        };

        Ok(Self {
            storage_backend,
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            redis_url: lookup("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: lookup("KEY_PREFIX").unwrap_or(defaults.key_prefix),
            seed_demo_data,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
