use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::Result;
use crate::store::entry::{resolve_range, StoreEntry};
use crate::store::Store;

/// In-process store with the same command semantics as Redis.
///
/// Used when no server is available and throughout the test suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoreEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        info!("Using in-memory store");
        Self::default()
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn flushdb(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoreEntry::Bytes(value.to_vec()));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => Ok(Some(entry.as_bytes()?.to_vec())),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        entries
            .entry(key.to_string())
            .or_insert_with(|| StoreEntry::Bytes(b"0".to_vec()))
            .increment()
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        entries
            .entry(key.to_string())
            .or_insert_with(|| StoreEntry::List(Vec::new()))
            .push(value.to_vec())
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let entries = self.entries.read().await;
        let Some(entry) = entries.get(key) else {
            return Ok(Vec::new());
        };
        let items = entry.as_list()?;
        Ok(resolve_range(items.len(), start, stop)
            .map(|range| items[range].to_vec())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();

        store.set("key", b"value").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites_list() {
        let store = MemoryStore::new();

        store.rpush("key", b"a").await.unwrap();
        store.set("key", b"value").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn test_incr_creates_counter() {
        let store = MemoryStore::new();

        assert_eq!(store.incr("counter").await.unwrap(), 1);
        assert_eq!(store.incr("counter").await.unwrap(), 2);
        assert_eq!(store.get("counter").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn test_incr_non_integer() {
        let store = MemoryStore::new();

        store.set("key", b"abc").await.unwrap();
        assert!(matches!(store.incr("key").await, Err(CacheError::Backend(_))));
    }

    #[tokio::test]
    async fn test_rpush_and_lrange() {
        let store = MemoryStore::new();

        assert_eq!(store.rpush("list", b"a").await.unwrap(), 1);
        assert_eq!(store.rpush("list", b"b").await.unwrap(), 2);
        assert_eq!(store.rpush("list", b"c").await.unwrap(), 3);

        let all = store.lrange("list", 0, -1).await.unwrap();
        assert_eq!(all, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);

        let tail = store.lrange("list", -2, -1).await.unwrap();
        assert_eq!(tail, vec![b"b".to_vec(), b"c".to_vec()]);
    }

    #[tokio::test]
    async fn test_lrange_missing_key() {
        let store = MemoryStore::new();
        assert!(store.lrange("missing", 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_type_errors() {
        let store = MemoryStore::new();

        store.set("string", b"value").await.unwrap();
        store.rpush("list", b"a").await.unwrap();

        assert!(store.get("list").await.is_err());
        assert!(store.rpush("string", b"b").await.is_err());
        assert!(store.lrange("string", 0, -1).await.is_err());
    }

    #[tokio::test]
    async fn test_flushdb() {
        let store = MemoryStore::new();

        store.set("a", b"1").await.unwrap();
        store.rpush("b", b"2").await.unwrap();
        assert_eq!(store.len().await, 2);

        store.flushdb().await.unwrap();
        assert!(store.is_empty().await);
    }
}
