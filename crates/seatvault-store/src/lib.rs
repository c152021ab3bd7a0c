//! # seatvault-store
//!
//! Store client implementations for SeatVault. Supports two modes:
//!
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//! - **memory**: In-process store for single-node use and tests
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
