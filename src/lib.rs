// Parking Registry - Core Library
// Exposes all modules for use in the CLI and tests

pub mod error;
pub mod money;
pub mod entities;
pub mod registry;
pub mod command;
pub mod config;

// Re-export commonly used types
pub use error::{ParkingError, ParkingResult};
pub use entities::{ParkingInterval, ParkingSpot, SpotKind};
pub use registry::{ParkingRegistry, RegistrySnapshot};
pub use command::{dispatch, Command, Session, END_SENTINEL};
pub use config::{Config, USAGE};
pub use money::format_bgn;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
