//! Store key builders for all SeatVault entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Key holding the reservation holder for a seat. Carries the hold TTL.
pub fn booking_hold(seat_id: &str) -> String {
    format!("booking:{seat_id}")
}

/// Key marking a seat as permanently sold. Never expires, never deleted.
pub fn sold_marker(seat_id: &str) -> String {
    format!("sold:{seat_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_hold_key() {
        assert_eq!(booking_hold("12A"), "booking:12A");
    }

    #[test]
    fn test_sold_marker_key() {
        assert_eq!(sold_marker("12A"), "sold:12A");
    }
}
