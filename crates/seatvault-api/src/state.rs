//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use seatvault_booking::BookingEngine;
use seatvault_core::config::AppConfig;
use seatvault_store::StoreManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Store client (Redis or in-memory).
    pub store: Arc<StoreManager>,
    /// Seat booking engine.
    pub booking: Arc<BookingEngine>,
}
