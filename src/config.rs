//! Configuration Module
//!
//! Handles loading the store connection settings from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::warn;

use crate::error::{CacheError, Result};
use crate::store::{MemoryStore, RedisStore, Store};

/// Default connection URL for the Redis backend.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/0";

// == Backend Kind ==
/// Which store implementation the cache talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Redis,
    Memory,
}

impl FromStr for BackendKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(BackendKind::Redis),
            "memory" => Ok(BackendKind::Memory),
            other => Err(CacheError::Config(format!("unknown backend: {other}"))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Redis => write!(f, "redis"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

// == Output Format ==
/// How the binary renders the call replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CacheError::Config(format!("unknown output format: {other}"))),
        }
    }
}

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Store implementation to use
    pub backend: BackendKind,
    /// Redis connection URL (ignored by the memory backend)
    pub redis_url: String,
    /// Replay rendering for the binary
    pub output_format: OutputFormat,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379/0)
    /// - `OUTPUT_FORMAT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        Self {
            backend: parse_or_default("CACHE_BACKEND"),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            output_format: parse_or_default("OUTPUT_FORMAT"),
        }
    }

    /// Builds the store handle for the configured backend.
    pub fn to_store(&self) -> Result<Arc<dyn Store>> {
        match self.backend {
            BackendKind::Redis => Ok(Arc::new(RedisStore::open(&self.redis_url)?)),
            BackendKind::Memory => Ok(Arc::new(MemoryStore::new())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            output_format: OutputFormat::default(),
        }
    }
}

fn parse_or_default<T>(var: &str) -> T
where
    T: FromStr<Err = CacheError> + Default,
{
    match env::var(var) {
        Ok(raw) => raw.parse().unwrap_or_else(|err| {
            warn!("Ignoring {var}: {err}");
            T::default()
        }),
        Err(_) => T::default(),
    }
}
