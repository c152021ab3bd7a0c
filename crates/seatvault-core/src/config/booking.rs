//! Booking engine configuration.

use serde::{Deserialize, Serialize};

/// Booking engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How long a reservation hold lives before the store expires it,
    /// in seconds.
    #[serde(default = "default_hold_ttl")]
    pub hold_ttl_seconds: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            hold_ttl_seconds: default_hold_ttl(),
        }
    }
}

fn default_hold_ttl() -> u64 {
    300
}
