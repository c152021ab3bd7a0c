//! Seat status as a closed tag set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Derived ownership state of a seat.
///
/// Not stored directly: computed from the presence of the sold marker and
/// the reservation hold, sold marker first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatStatus {
    /// No sold marker and no active hold.
    Available,
    /// An active hold exists and the seat is not sold.
    Reserved,
    /// The sold marker exists. Terminal.
    Sold,
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Reserved => write!(f, "Reserved"),
            Self::Sold => write!(f, "Sold"),
        }
    }
}
