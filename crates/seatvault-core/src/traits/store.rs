//! Store client trait for pluggable key-value backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// A single operation inside an atomic store transaction.
///
/// The closed set keeps transactions exhaustive-checkable by every backend:
/// a backend either applies all operations or none of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// Set a key to a value with no expiry.
    Set {
        /// Target key.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Delete a key.
    Delete {
        /// Target key.
        key: String,
    },
}

impl StoreOp {
    /// Build a `Set` operation.
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a `Delete` operation.
    pub fn delete(key: impl Into<String>) -> Self {
        Self::Delete { key: key.into() }
    }
}

/// Trait for key-value store backends (Redis or in-memory).
///
/// All values are plain strings. Mutual exclusion between concurrent
/// callers is the backend's responsibility: `set_nx` must be atomic and
/// `transaction` must be all-or-nothing.
#[async_trait]
pub trait StoreProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has
    /// expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value only if the key does not already exist, attaching a TTL
    /// after which the backend removes the key on its own.
    /// Returns `true` if the value was set, `false` if the key already existed.
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Delete a key from the store.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists in the store.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Apply a sequence of operations atomically: either every operation
    /// takes effect or none does.
    async fn transaction(&self, ops: &[StoreOp]) -> AppResult<()>;

    /// Check that the store backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
