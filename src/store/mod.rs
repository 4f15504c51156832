//! Store Module
//!
//! The seam between the cache wrapper and the key-value store it delegates to.

mod entry;
mod memory;
mod redis;

use std::any::Any;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;

pub use self::entry::StoreEntry;
pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

/// The store primitives the cache is built on.
///
/// Implementations follow Redis semantics for every command, including the
/// type errors raised when a string command touches a list key and back.
#[async_trait]
pub trait Store: Any + Debug + Send + Sync {
    /// Round-trip health check.
    async fn ping(&self) -> Result<()>;

    /// Removes every key in the selected database.
    async fn flushdb(&self) -> Result<()>;

    /// Sets `key` to `value`, replacing whatever was stored there.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Reads a string key.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bytes))` if the key holds a value
    /// * `Ok(None)` if the key does not exist
    /// * `Err(_)` if the key holds a list
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Increments the integer at `key` by one, starting from zero, and
    /// returns the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the list at `key` and returns the new length.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// Returns the elements of the list at `key` between `start` and `stop`
    /// inclusive. Negative indices count from the end of the list.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;
}
