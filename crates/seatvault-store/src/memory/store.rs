//! In-memory store implementation for single-node use and tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use seatvault_core::result::AppResult;
use seatvault_core::traits::store::{StoreOp, StoreProvider};

/// A stored value with an optional expiry deadline.
#[derive(Debug, Clone)]
struct Entry {
    /// Stored value.
    value: String,
    /// Instant after which the entry no longer exists. `None` = no expiry.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now < deadline,
            None => true,
        }
    }
}

/// In-memory store provider using a Tokio mutex for thread safety.
///
/// Expired entries are dropped lazily on access. Holding the mutex across
/// a whole `transaction` call makes it atomic with respect to every other
/// operation, matching the guarantees the engine gets from Redis.
///
/// Suitable for single-node deployments only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreProvider {
    /// Protected key space.
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryStoreProvider {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl StoreProvider for MemoryStoreProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        if entries.get(key).is_some_and(|e| e.is_live(now)) {
            return Ok(false);
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(now + ttl),
            },
        );
        Ok(true)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(true),
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn transaction(&self, ops: &[StoreOp]) -> AppResult<()> {
        // One lock acquisition for the whole batch.
        let mut entries = self.entries.lock().await;

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    entries.insert(
                        key.clone(),
                        Entry {
                            value: value.clone(),
                            expires_at: None,
                        },
                    );
                }
                StoreOp::Delete { key } => {
                    entries.remove(key);
                }
            }
        }

        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryStoreProvider {
        MemoryStoreProvider::new()
    }

    #[tokio::test]
    async fn test_set_nx_then_get() {
        let provider = make_provider();
        let set = provider
            .set_nx("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(set);
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_set_nx_respects_existing() {
        let provider = make_provider();
        let first = provider
            .set_nx("nx_key", "val", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(first);
        let second = provider
            .set_nx("nx_key", "val2", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!second);
        // Losing writer must not overwrite.
        let val = provider.get("nx_key").await.unwrap();
        assert_eq!(val, Some("val".to_string()));
    }

    #[tokio::test]
    async fn test_expiry_frees_key() {
        let provider = make_provider();
        provider
            .set_nx("short", "val", Duration::from_millis(20))
            .await
            .unwrap();
        assert!(provider.exists("short").await.unwrap());

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(!provider.exists("short").await.unwrap());
        assert_eq!(provider.get("short").await.unwrap(), None);
        // Key is reusable after expiry.
        let set = provider
            .set_nx("short", "val2", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(set);
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set_nx("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        let val = provider.get("key2").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_transaction_applies_all_ops() {
        let provider = make_provider();
        provider
            .set_nx("hold", "alice", Duration::from_secs(60))
            .await
            .unwrap();

        provider
            .transaction(&[StoreOp::set("marker", "true"), StoreOp::delete("hold")])
            .await
            .unwrap();

        assert_eq!(
            provider.get("marker").await.unwrap(),
            Some("true".to_string())
        );
        assert_eq!(provider.get("hold").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_transaction_set_has_no_expiry() {
        let provider = make_provider();
        provider
            .transaction(&[StoreOp::set("marker", "true")])
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(provider.exists("marker").await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}
