//! Call Instrumentation
//!
//! Wraps an operation's future with a call counter and a call-history log,
//! both kept in the store under keys derived from the operation's qualified
//! name (for example `Cache.store`).

use std::fmt::Display;
use std::future::Future;

use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::Store;

/// Key of the list holding the recorded inputs of `qualname`.
pub fn inputs_key(qualname: &str) -> String {
    format!("{qualname}:inputs")
}

/// Key of the list holding the recorded outputs of `qualname`.
pub fn outputs_key(qualname: &str) -> String {
    format!("{qualname}:outputs")
}

/// Increments the counter for `qualname`, then runs `call`.
///
/// The counter is bumped even if `call` later fails.
pub async fn count_calls<S, F, T>(store: &S, qualname: &str, call: F) -> Result<T>
where
    S: Store + ?Sized,
    F: Future<Output = Result<T>>,
{
    let count = store.incr(qualname).await?;
    debug!(qualname, count, "call counted");
    call.await
}

/// Output recorded for a call that returned an error.
pub fn failed_output(error: &CacheError) -> String {
    format!("<failed: {error}>")
}

/// Records `input` before running `call` and the call's output after it.
///
/// A failed call records [`failed_output`] in place of an output so the
/// input and output lists stay aligned, then returns the original error.
pub async fn call_history<S, F, T>(store: &S, qualname: &str, input: String, call: F) -> Result<T>
where
    S: Store + ?Sized,
    F: Future<Output = Result<T>>,
    T: Display,
{
    store.rpush(&inputs_key(qualname), input.as_bytes()).await?;
    let (recorded, result) = match call.await {
        Ok(output) => (output.to_string(), Ok(output)),
        Err(err) => (failed_output(&err), Err(err)),
    };
    store
        .rpush(&outputs_key(qualname), recorded.as_bytes())
        .await?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CallHistory;
    use crate::store::MemoryStore;

    const QUALNAME: &str = "Widget.build";

    #[test]
    fn test_keys_derive_from_qualname() {
        assert_eq!(inputs_key(QUALNAME), "Widget.build:inputs");
        assert_eq!(outputs_key(QUALNAME), "Widget.build:outputs");
    }

    #[tokio::test]
    async fn test_count_calls() {
        let store = MemoryStore::new();

        for expected in 1..=3 {
            let result = count_calls(&store, QUALNAME, async { Ok(expected) }).await;
            assert_eq!(result.unwrap(), expected);
        }

        assert_eq!(store.get(QUALNAME).await.unwrap(), Some(b"3".to_vec()));
    }

    #[tokio::test]
    async fn test_count_calls_counts_failures() {
        let store = MemoryStore::new();

        let result: Result<()> = count_calls(&store, QUALNAME, async {
            Err(CacheError::Backend("boom".to_string()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(store.get(QUALNAME).await.unwrap(), Some(b"1".to_vec()));
    }

    #[tokio::test]
    async fn test_call_history_records_pairs() {
        let store = MemoryStore::new();

        call_history(&store, QUALNAME, "first".to_string(), async { Ok(1) })
            .await
            .unwrap();
        call_history(&store, QUALNAME, "second".to_string(), async { Ok(2) })
            .await
            .unwrap();

        let inputs = store.lrange(&inputs_key(QUALNAME), 0, -1).await.unwrap();
        let outputs = store.lrange(&outputs_key(QUALNAME), 0, -1).await.unwrap();
        assert_eq!(inputs, vec![b"first".to_vec(), b"second".to_vec()]);
        assert_eq!(outputs, vec![b"1".to_vec(), b"2".to_vec()]);
    }

    #[tokio::test]
    async fn test_call_history_records_failure_marker() {
        let store = MemoryStore::new();

        let result: Result<u8> = call_history(&store, QUALNAME, "input".to_string(), async {
            Err(CacheError::Backend("boom".to_string()))
        })
        .await;

        assert!(matches!(result, Err(CacheError::Backend(_))));
        let outputs = store.lrange(&outputs_key(QUALNAME), 0, -1).await.unwrap();
        assert_eq!(outputs, vec![b"<failed: Backend error: boom>".to_vec()]);
    }

    #[tokio::test]
    async fn test_failure_then_success_stays_paired() {
        let store = MemoryStore::new();

        let failed: Result<String> = call_history(&store, QUALNAME, "failed".to_string(), async {
            Err(CacheError::Backend("boom".to_string()))
        })
        .await;
        assert!(failed.is_err());
        call_history(&store, QUALNAME, "ok".to_string(), async { Ok("key-ok".to_string()) })
            .await
            .unwrap();

        let history = CallHistory::from_raw(
            store.lrange(&inputs_key(QUALNAME), 0, -1).await.unwrap(),
            store.lrange(&outputs_key(QUALNAME), 0, -1).await.unwrap(),
        );
        let records = history.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].input, "failed");
        assert_eq!(records[0].output, "<failed: Backend error: boom>");
        assert_eq!(records[1].input, "ok");
        assert_eq!(records[1].output, "key-ok");
    }
}
