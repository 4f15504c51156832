//! Error types for the cache wrapper
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache wrapper.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failure reported by the Redis client (connection loss, wrong type, ...)
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Failure reported by the in-memory backend
    #[error("Backend error: {0}")]
    Backend(String),

    /// Retrieved bytes could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),
}

impl From<std::string::FromUtf8Error> for CacheError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        CacheError::Decode(error.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache wrapper.
pub type Result<T> = std::result::Result<T, CacheError>;
