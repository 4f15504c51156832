//! Cache Wrapper
//!
//! The cache wrapper: stores values under random keys and reads them back,
//! with the store operation counted and logged.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::history::{CallHistory, Replay};
use crate::cache::instrument::{call_history, count_calls, inputs_key, outputs_key};
use crate::cache::Value;
use crate::config::Config;
use crate::error::Result;
use crate::store::Store;

/// Qualified name of [`Cache::store`], used as its counter key.
pub const STORE_QUALNAME: &str = "Cache.store";

// == Cache ==
/// Cache bound to a store connection.
#[derive(Debug, Clone)]
pub struct Cache {
    store: Arc<dyn Store>,
}

impl Cache {
    // == Constructor ==
    /// Binds to `store`, checks it is reachable and empties the database.
    pub async fn new(store: Arc<dyn Store>) -> Result<Self> {
        store.ping().await?;
        store.flushdb().await?;
        info!("Cache initialized, database flushed");
        Ok(Self { store })
    }

    /// Builds the configured store and binds to it.
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.to_store()?).await
    }

    // == Store ==
    /// Stores `data` under a freshly generated UUIDv4 key and returns the key.
    ///
    /// Each call increments the `Cache.store` counter and appends to its
    /// input and output history lists.
    pub async fn store(&self, data: impl Into<Value>) -> Result<String> {
        let data = data.into();
        let store = self.store.as_ref();

        count_calls(
            store,
            STORE_QUALNAME,
            call_history(store, STORE_QUALNAME, data.to_string(), async {
                let key = Uuid::new_v4().to_string();
                store.set(&key, &data.to_bytes()).await?;
                debug!(%key, "stored value");
                Ok(key)
            }),
        )
        .await
    }

    // == Get ==
    /// Returns the raw bytes stored under `key`, if any.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Returns the value under `key` converted by `decode`.
    ///
    /// `decode` is not called when the key is missing.
    pub async fn get_with<T, F>(&self, key: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> T,
    {
        Ok(self.get(key).await?.map(decode))
    }

    /// Returns the value under `key` as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, String::from_utf8).await?.transpose().map_err(Into::into)
    }

    /// Returns the value under `key` as an integer, or `0` when the stored
    /// bytes are not a decimal integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, |raw| decode_int(&raw)).await
    }

    // == Instrumentation Views ==
    /// Number of recorded calls of `qualname`.
    pub async fn call_count(&self, qualname: &str) -> Result<u64> {
        let count = self.get_int(qualname).await?.unwrap_or(0);
        Ok(count.max(0) as u64)
    }

    /// Recorded inputs and outputs of `qualname`.
    pub async fn history(&self, qualname: &str) -> Result<CallHistory> {
        let inputs = self.store.lrange(&inputs_key(qualname), 0, -1).await?;
        let outputs = self.store.lrange(&outputs_key(qualname), 0, -1).await?;
        Ok(CallHistory::from_raw(inputs, outputs))
    }

    /// Counter and history of `qualname` together.
    pub async fn replay(&self, qualname: &str) -> Result<Replay> {
        let calls = self.call_count(qualname).await?;
        let history = self.history(qualname).await?;
        Ok(Replay::new(qualname, calls, &history))
    }
}

/// Parses stored bytes as a decimal integer, falling back to zero.
pub fn decode_int(raw: &[u8]) -> i64 {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0)
}
