//! # seatvault-api
//!
//! HTTP API layer for SeatVault built on Axum.
//!
//! Provides the seat endpoints (status, reserve, buy), health checks,
//! middleware (CORS, request tracing), DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
