//! Response DTOs.

use serde::{Deserialize, Serialize};

use seatvault_booking::SeatStatus;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Seat status lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatStatusResponse {
    /// Seat identifier.
    pub seat_id: String,
    /// Derived seat status.
    pub status: SeatStatus,
}

/// Outcome of a successful reserve or buy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingActionResponse {
    /// `"reserved"` or `"sold"`.
    pub status: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Status.
    pub status: String,
    /// Store reachability.
    pub store: String,
}
