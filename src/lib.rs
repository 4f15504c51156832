//! Redis Basic - A thin cache wrapper over Redis
//!
//! Stores scalar values under random keys, reads them back with optional
//! decoding, and keeps a call counter and call history for each store.

pub mod cache;
pub mod config;
pub mod error;
pub mod store;

pub use cache::{Cache, Replay, Value, STORE_QUALNAME};
pub use config::Config;
pub use error::{CacheError, Result};
