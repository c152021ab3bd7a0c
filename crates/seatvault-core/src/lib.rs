//! # seatvault-core
//!
//! Core crate for SeatVault. Contains the store-client trait, configuration
//! schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SeatVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
