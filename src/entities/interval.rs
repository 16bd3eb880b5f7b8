// ⏱️ Parking Interval - one recorded parking event
//
// An interval only remembers which spot it belongs to (by id). Revenue is
// never stored: it is derived from the owning spot's price at read time, so a
// later price change re-prices history.

use serde::Serialize;

use crate::entities::spot::ParkingSpot;
use crate::error::{ParkingError, ParkingResult};
use crate::money::format_bgn;

#[derive(Debug, Clone, Serialize)]
pub struct ParkingInterval {
    /// Owning spot (lookup key only, the spot owns the interval)
    pub spot_id: i32,

    /// Plate exactly as supplied by the parking command
    pub registration_plate: String,

    /// Always > 0
    pub hours_parked: i32,
}

impl ParkingInterval {
    /// Validated constructor: non-empty plate, positive hours
    pub fn new(spot_id: i32, registration_plate: &str, hours_parked: i32) -> ParkingResult<Self> {
        if registration_plate.is_empty() {
            return Err(ParkingError::validation(
                "registration_plate",
                "Registration plate can't be null or empty!",
            ));
        }

        if hours_parked <= 0 {
            return Err(ParkingError::validation(
                "hours_parked",
                "Hours parked can't be zero or negative!",
            ));
        }

        Ok(ParkingInterval {
            spot_id,
            registration_plate: registration_plate.to_string(),
            hours_parked,
        })
    }

    /// Revenue against the owning spot's *current* price.
    /// Subscription spots never earn anything.
    pub fn revenue(&self, spot: &ParkingSpot) -> f64 {
        debug_assert_eq!(spot.id(), self.spot_id);

        if spot.kind().is_subscription() {
            return 0.0;
        }
        spot.price_per_hour() * f64::from(self.hours_parked)
    }

    /// Four-line description used by the intervals query
    pub fn describe(&self, spot: &ParkingSpot) -> String {
        format!(
            "Parking Spot #{}\nRegistrationPlate: {}\nHoursParked: {}\nRevenue: {}",
            self.spot_id,
            self.registration_plate,
            self.hours_parked,
            format_bgn(self.revenue(spot))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::spot::SpotKind;

    #[test]
    fn test_interval_rejects_empty_plate() {
        let err = ParkingInterval::new(1, "", 2).unwrap_err();
        assert!(matches!(err, ParkingError::Validation { ref field, .. } if field == "registration_plate"));
    }

    #[test]
    fn test_interval_rejects_non_positive_hours() {
        assert!(ParkingInterval::new(1, "CA1234AB", 0).is_err());
        assert!(ParkingInterval::new(1, "CA1234AB", -3).is_err());
        assert!(ParkingInterval::new(1, "CA1234AB", 1).is_ok());
    }

    #[test]
    fn test_revenue_follows_current_price() {
        let mut spot = ParkingSpot::new(1, false, SpotKind::Car, 2.0).unwrap();
        let interval = ParkingInterval::new(1, "CA1234AB", 3).unwrap();
        assert_eq!(interval.revenue(&spot), 6.0);

        // Re-pricing the spot re-prices history
        spot.set_price_per_hour(4.0).unwrap();
        assert_eq!(interval.revenue(&spot), 12.0);
    }

    #[test]
    fn test_subscription_interval_earns_nothing() {
        let spot = ParkingSpot::new(
            7,
            false,
            SpotKind::Subscription { bound_plate: "AB1234CD".to_string() },
            10.0,
        )
        .unwrap();
        let interval = ParkingInterval::new(7, "AB1234CD", 48).unwrap();
        assert_eq!(interval.revenue(&spot), 0.0);
    }

    #[test]
    fn test_describe_format() {
        let spot = ParkingSpot::new(3, false, SpotKind::Bus, 1.25).unwrap();
        let interval = ParkingInterval::new(3, "B7777XX", 2).unwrap();
        assert_eq!(
            interval.describe(&spot),
            "Parking Spot #3\nRegistrationPlate: B7777XX\nHoursParked: 2\nRevenue: 2.50 BGN"
        );
    }
}
