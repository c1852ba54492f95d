use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures of the backing medium itself, as opposed to bad bytes.
    pub fn is_medium_failure(&self) -> bool {
        matches!(
            self,
            AppError::Io(_) | AppError::Redis(_) | AppError::Unavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
