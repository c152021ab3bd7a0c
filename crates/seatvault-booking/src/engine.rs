//! The seat ownership engine.
//!
//! Three operations over the shared store: `reserve` grants a time-bounded
//! exclusive hold, `purchase` converts a hold into a permanent sale, and
//! `status` derives the seat state from key presence. The engine holds no
//! state of its own and takes no in-process locks; mutual exclusion comes
//! entirely from the store's SET-NX and transaction primitives.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use seatvault_core::config::booking::BookingConfig;
use seatvault_core::result::AppResult;
use seatvault_core::traits::store::{StoreOp, StoreProvider};
use seatvault_store::{StoreManager, keys};

use crate::status::SeatStatus;

/// Value written under the sold marker key.
const SOLD_VALUE: &str = "true";

/// Stateless booking engine over an injected store client.
///
/// Cheap to clone; every clone shares the same store handle.
#[derive(Debug, Clone)]
pub struct BookingEngine {
    /// Store client, shared across all engine clones and request tasks.
    store: Arc<StoreManager>,
    /// Fixed lifetime of a reservation hold.
    hold_ttl: Duration,
}

impl BookingEngine {
    /// Create an engine from configuration.
    pub fn new(store: Arc<StoreManager>, config: &BookingConfig) -> Self {
        Self::with_hold_ttl(store, Duration::from_secs(config.hold_ttl_seconds))
    }

    /// Create an engine with an explicit hold TTL.
    pub fn with_hold_ttl(store: Arc<StoreManager>, hold_ttl: Duration) -> Self {
        Self { store, hold_ttl }
    }

    /// Grant `requester_id` a time-bounded exclusive hold on `seat_id`.
    ///
    /// Returns `Ok(false)` if the seat is already sold or already held by
    /// anyone, including the same requester re-requesting. No retries; the
    /// caller decides how to surface an unavailable seat.
    ///
    /// The sold-check and the conditional write are two separate round
    /// trips. A sale completing in the gap leaves a hold on a sold seat,
    /// which is inert: the sold marker dominates `status` and blocks
    /// `purchase` regardless.
    ///
    /// # Errors
    ///
    /// Propagates store connectivity failures as [`seatvault_core::AppError`].
    pub async fn reserve(&self, seat_id: &str, requester_id: &str) -> AppResult<bool> {
        if self.store.exists(&keys::sold_marker(seat_id)).await? {
            debug!(seat_id, requester_id, "Reserve rejected: seat already sold");
            return Ok(false);
        }

        let granted = self
            .store
            .set_nx(&keys::booking_hold(seat_id), requester_id, self.hold_ttl)
            .await?;

        if granted {
            info!(
                seat_id,
                requester_id,
                ttl_seconds = self.hold_ttl.as_secs(),
                "Seat hold granted"
            );
        } else {
            debug!(seat_id, requester_id, "Reserve rejected: seat already held");
        }

        Ok(granted)
    }

    /// Convert an active hold held by `requester_id` into a permanent sale.
    ///
    /// Returns `Ok(false)` unless the hold exists and belongs to exactly
    /// `requester_id` at the time of the ownership read; expired, foreign,
    /// and never-created holds are rejected uniformly. The sale itself is a
    /// single atomic transaction: set the sold marker (no expiry) and delete
    /// the hold, together or not at all.
    ///
    /// # Errors
    ///
    /// Propagates store connectivity failures from the ownership read. A
    /// failure of the sale transaction itself is reported as `Ok(false)`:
    /// the store guarantees no partial application, so the seat state is
    /// unchanged and the caller may retry while the hold lives.
    pub async fn purchase(&self, seat_id: &str, requester_id: &str) -> AppResult<bool> {
        let holder = self.store.get(&keys::booking_hold(seat_id)).await?;
        if holder.as_deref() != Some(requester_id) {
            debug!(
                seat_id,
                requester_id, "Purchase rejected: no matching active hold"
            );
            return Ok(false);
        }

        let ops = [
            StoreOp::set(keys::sold_marker(seat_id), SOLD_VALUE),
            StoreOp::delete(keys::booking_hold(seat_id)),
        ];

        match self.store.transaction(&ops).await {
            Ok(()) => {
                info!(seat_id, requester_id, "Seat sold");
                Ok(true)
            }
            Err(err) => {
                warn!(seat_id, requester_id, error = %err, "Sale transaction failed");
                Ok(false)
            }
        }
    }

    /// Derive the current status of a seat. Pure read.
    ///
    /// The sold marker is checked first and is authoritative: a stale hold
    /// key next to a sold marker must not change the verdict.
    ///
    /// # Errors
    ///
    /// Propagates store connectivity failures as [`seatvault_core::AppError`].
    pub async fn status(&self, seat_id: &str) -> AppResult<SeatStatus> {
        if self.store.exists(&keys::sold_marker(seat_id)).await? {
            return Ok(SeatStatus::Sold);
        }
        if self.store.exists(&keys::booking_hold(seat_id)).await? {
            return Ok(SeatStatus::Reserved);
        }
        Ok(SeatStatus::Available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use seatvault_core::error::{AppError, ErrorKind};
    use seatvault_store::memory::MemoryStoreProvider;

    fn make_engine() -> BookingEngine {
        make_engine_with_ttl(Duration::from_secs(300))
    }

    fn make_engine_with_ttl(ttl: Duration) -> BookingEngine {
        let store = Arc::new(StoreManager::from_provider(Arc::new(
            MemoryStoreProvider::new(),
        )));
        BookingEngine::with_hold_ttl(store, ttl)
    }

    #[tokio::test]
    async fn test_reserve_then_conflict() {
        let engine = make_engine();
        assert!(engine.reserve("1A", "alice").await.unwrap());
        assert_eq!(engine.status("1A").await.unwrap(), SeatStatus::Reserved);
        assert!(!engine.reserve("1A", "bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_reserve_is_not_reentrant() {
        let engine = make_engine();
        assert!(engine.reserve("1B", "alice").await.unwrap());
        // Same requester asking again is a conflict too.
        assert!(!engine.reserve("1B", "alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_purchase_flow() {
        let engine = make_engine();
        assert!(engine.reserve("2B", "bob").await.unwrap());
        assert!(engine.purchase("2B", "bob").await.unwrap());
        assert_eq!(engine.status("2B").await.unwrap(), SeatStatus::Sold);
    }

    #[tokio::test]
    async fn test_purchase_without_reservation() {
        let engine = make_engine();
        assert!(!engine.purchase("3C", "carol").await.unwrap());
        assert_eq!(engine.status("3C").await.unwrap(), SeatStatus::Available);
    }

    #[tokio::test]
    async fn test_purchase_by_wrong_holder() {
        let engine = make_engine();
        assert!(engine.reserve("4D", "dan").await.unwrap());
        assert!(!engine.purchase("4D", "erin").await.unwrap());
        assert_eq!(engine.status("4D").await.unwrap(), SeatStatus::Reserved);
        // The rightful holder is unaffected.
        assert!(engine.purchase("4D", "dan").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_reserve_grants_exactly_one() {
        let engine = make_engine();
        let (a, b) = tokio::join!(engine.reserve("5E", "alice"), engine.reserve("5E", "bob"));
        let a = a.unwrap();
        let b = b.unwrap();
        assert!(a ^ b, "exactly one of two racing reserves must win");
    }

    #[tokio::test]
    async fn test_sold_is_terminal() {
        let engine = make_engine();
        assert!(engine.reserve("6F", "frank").await.unwrap());
        assert!(engine.purchase("6F", "frank").await.unwrap());

        assert!(!engine.reserve("6F", "frank").await.unwrap());
        assert!(!engine.reserve("6F", "grace").await.unwrap());
        assert!(!engine.purchase("6F", "frank").await.unwrap());
        assert!(!engine.purchase("6F", "grace").await.unwrap());
        assert_eq!(engine.status("6F").await.unwrap(), SeatStatus::Sold);
    }

    #[tokio::test]
    async fn test_hold_expiry_frees_seat() {
        let engine = make_engine_with_ttl(Duration::from_millis(30));
        assert!(engine.reserve("7G", "henry").await.unwrap());
        assert_eq!(engine.status("7G").await.unwrap(), SeatStatus::Reserved);

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(engine.status("7G").await.unwrap(), SeatStatus::Available);
        // An expired hold no longer authorizes a purchase.
        assert!(!engine.purchase("7G", "henry").await.unwrap());
        // And the seat is up for grabs again.
        assert!(engine.reserve("7G", "iris").await.unwrap());
    }

    #[tokio::test]
    async fn test_sold_marker_dominates_stale_hold() {
        // Inject the inconsistent state directly: both keys present.
        let provider = Arc::new(MemoryStoreProvider::new());
        let store = Arc::new(StoreManager::from_provider(provider));
        store
            .set_nx(&keys::booking_hold("8H"), "ghost", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .transaction(&[StoreOp::set(keys::sold_marker("8H"), "true")])
            .await
            .unwrap();

        let engine = BookingEngine::with_hold_ttl(store, Duration::from_secs(300));
        assert_eq!(engine.status("8H").await.unwrap(), SeatStatus::Sold);
    }

    /// Store stub whose transactions always fail; everything else delegates.
    #[derive(Debug)]
    struct TxFailStore {
        inner: MemoryStoreProvider,
    }

    #[async_trait]
    impl StoreProvider for TxFailStore {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key).await
        }
        async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
            self.inner.set_nx(key, value, ttl).await
        }
        async fn delete(&self, key: &str) -> AppResult<()> {
            self.inner.delete(key).await
        }
        async fn exists(&self, key: &str) -> AppResult<bool> {
            self.inner.exists(key).await
        }
        async fn transaction(&self, _ops: &[StoreOp]) -> AppResult<()> {
            Err(AppError::store("transaction refused"))
        }
        async fn health_check(&self) -> AppResult<bool> {
            self.inner.health_check().await
        }
    }

    #[tokio::test]
    async fn test_failed_sale_transaction_is_a_rejection() {
        let store = Arc::new(StoreManager::from_provider(Arc::new(TxFailStore {
            inner: MemoryStoreProvider::new(),
        })));
        let engine = BookingEngine::with_hold_ttl(Arc::clone(&store), Duration::from_secs(300));

        assert!(engine.reserve("9I", "judy").await.unwrap());
        // Transaction fails with no partial effect: purchase reports false.
        assert!(!engine.purchase("9I", "judy").await.unwrap());
        // The hold is untouched and the seat is not sold.
        assert_eq!(engine.status("9I").await.unwrap(), SeatStatus::Reserved);
        assert_eq!(
            store.get(&keys::booking_hold("9I")).await.unwrap(),
            Some("judy".to_string())
        );
    }

    /// Store stub that is entirely unreachable.
    #[derive(Debug)]
    struct DownStore;

    #[async_trait]
    impl StoreProvider for DownStore {
        async fn get(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::store("connection refused"))
        }
        async fn set_nx(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<bool> {
            Err(AppError::store("connection refused"))
        }
        async fn delete(&self, _key: &str) -> AppResult<()> {
            Err(AppError::store("connection refused"))
        }
        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Err(AppError::store("connection refused"))
        }
        async fn transaction(&self, _ops: &[StoreOp]) -> AppResult<()> {
            Err(AppError::store("connection refused"))
        }
        async fn health_check(&self) -> AppResult<bool> {
            Err(AppError::store("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_unreachable_store_propagates_as_error() {
        let store = Arc::new(StoreManager::from_provider(Arc::new(DownStore)));
        let engine = BookingEngine::with_hold_ttl(store, Duration::from_secs(300));

        let err = engine.status("10J").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Store);
        let err = engine.reserve("10J", "kate").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Store);
        let err = engine.purchase("10J", "kate").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Store);
    }
}
