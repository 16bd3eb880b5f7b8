// 🅿️ Parking Spot Entity - kind-specific admission
//
// Three kinds share one struct. The kind tag carries the only kind-specific
// data (the bound plate of a subscription spot) and decides admission:
// - car / bus: requested vehicle kind must equal the spot kind
// - subscription: supplied plate must equal the bound plate, kind is ignored
//
// Admission only records the interval. Flipping `occupied` is the registry's
// job once the park has been accepted.

use serde::Serialize;

use crate::entities::interval::ParkingInterval;
use crate::error::{ParkingError, ParkingResult};
use crate::money::format_bgn;

/// Case-insensitive comparison used for kinds and plates.
/// Unicode lowercasing, so Cyrillic plates compare too; no allocation.
pub fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

// ============================================================================
// SPOT KIND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpotKind {
    Car,
    Bus,
    /// Reserved for a single vehicle
    Subscription { bound_plate: String },
}

impl SpotKind {
    /// Lower-case name, as shown in the spot description
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotKind::Car => "car",
            SpotKind::Bus => "bus",
            SpotKind::Subscription { .. } => "subscription",
        }
    }

    pub fn is_subscription(&self) -> bool {
        matches!(self, SpotKind::Subscription { .. })
    }

    /// Admission predicate (occupancy is checked separately)
    pub fn admits(&self, plate: &str, requested_kind: &str) -> bool {
        match self {
            SpotKind::Car | SpotKind::Bus => same_ignoring_case(self.as_str(), requested_kind),
            SpotKind::Subscription { bound_plate } => same_ignoring_case(bound_plate, plate),
        }
    }
}

// ============================================================================
// PARKING SPOT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ParkingSpot {
    id: i32,

    pub occupied: bool,

    #[serde(flatten)]
    kind: SpotKind,

    /// Always > 0, only changed through `set_price_per_hour`
    price_per_hour: f64,

    /// Append-only parking history
    intervals: Vec<ParkingInterval>,
}

impl ParkingSpot {
    /// Create a spot, validating price and (for subscriptions) the bound plate
    pub fn new(id: i32, occupied: bool, kind: SpotKind, price_per_hour: f64) -> ParkingResult<Self> {
        validate_price(price_per_hour)?;

        if let SpotKind::Subscription { bound_plate } = &kind {
            if bound_plate.is_empty() {
                return Err(ParkingError::validation(
                    "bound_plate",
                    "Registration plate can't be null or empty!",
                ));
            }
        }

        Ok(ParkingSpot {
            id,
            occupied,
            kind,
            price_per_hour,
            intervals: Vec::new(),
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn kind(&self) -> &SpotKind {
        &self.kind
    }

    pub fn price_per_hour(&self) -> f64 {
        self.price_per_hour
    }

    pub fn set_price_per_hour(&mut self, price: f64) -> ParkingResult<()> {
        validate_price(price)?;
        self.price_per_hour = price;
        Ok(())
    }

    pub fn intervals(&self) -> &[ParkingInterval] {
        &self.intervals
    }

    /// Try to admit a vehicle.
    ///
    /// * `Ok(true)`  - admitted, interval appended (caller marks the spot occupied)
    /// * `Ok(false)` - spot occupied or admission predicate failed, nothing changed
    /// * `Err(_)`    - admitted but the interval itself is invalid, nothing changed
    pub fn park_vehicle(&mut self, plate: &str, hours: i32, requested_kind: &str) -> ParkingResult<bool> {
        if self.occupied || !self.kind.admits(plate, requested_kind) {
            return Ok(false);
        }

        let interval = ParkingInterval::new(self.id, plate, hours)?;
        self.intervals.push(interval);
        Ok(true)
    }

    /// Every recorded interval for a plate (case-insensitive), oldest first
    pub fn intervals_for_plate(&self, plate: &str) -> Vec<&ParkingInterval> {
        self.intervals
            .iter()
            .filter(|i| same_ignoring_case(&i.registration_plate, plate))
            .collect()
    }

    pub fn total_revenue(&self) -> f64 {
        self.intervals.iter().fold(0.0, |acc, i| acc + i.revenue(self))
    }

    /// Four-line description used by the lookup query
    pub fn describe(&self) -> String {
        format!(
            "Parking Spot #{}\nOccupied: {}\nType: {}\nPrice per hour: {}",
            self.id,
            if self.occupied { "True" } else { "False" },
            self.kind.as_str(),
            format_bgn(self.price_per_hour)
        )
    }
}

fn validate_price(price: f64) -> ParkingResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ParkingError::validation(
            "price",
            "Parking price cannot be less or equal to 0!",
        ));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
