//! Core traits defined in `seatvault-core` and implemented by other crates.

pub mod store;

pub use store::{StoreOp, StoreProvider};
