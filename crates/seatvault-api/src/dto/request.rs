//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body for reserve and buy requests.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SeatActionRequest {
    /// Seat identifier.
    #[validate(length(min = 1, message = "Seat id is required"))]
    pub seat_id: String,
    /// Requester identifier.
    #[validate(length(min = 1, message = "Requester id is required"))]
    pub requester_id: String,
}
