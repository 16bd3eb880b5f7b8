// Entity Models
//
// Each spot owns its parking history:
// - ParkingSpot: integer identity, kind tag, validated price, occupancy
// - ParkingInterval: one recorded park, priced against its spot on demand

pub mod spot;
pub mod interval;

pub use spot::{ParkingSpot, SpotKind};
pub use interval::ParkingInterval;
