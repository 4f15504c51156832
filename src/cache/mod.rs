//! Cache Module
//!
//! Provides the cache wrapper over a [`crate::store::Store`] together with
//! the call counting and call history kept for its store operation.

mod history;
pub mod instrument;
mod value;
mod wrapper;


// Re-export public types
pub use history::{CallHistory, CallRecord, Replay};
pub use value::Value;
pub use wrapper::{decode_int, Cache, STORE_QUALNAME};
