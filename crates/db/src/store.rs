//! Key-value storage backends.
//!
//! The planner persists a handful of JSON documents under fixed keys, the
//! same way a browser's local storage would hold them. Any backend that can
//! get and set a string by key can host the planner.

pub mod file;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
}
