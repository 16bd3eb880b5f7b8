// ⌨️ Command Dispatcher
// "Name:arg1:arg2:..." lines → registry operation → result line

use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::{BufRead, Write};

use crate::registry::ParkingRegistry;

/// Line that ends a session
pub const END_SENTINEL: &str = "End";

// ============================================================================
// COMMAND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CreateParkingSpot,
    ParkVehicle,
    FreeParkingSpot,
    GetParkingSpotById,
    GetParkingIntervalsByPlate,
    CalculateTotal,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CreateParkingSpot" => Some(Command::CreateParkingSpot),
            "ParkVehicle" => Some(Command::ParkVehicle),
            "FreeParkingSpot" => Some(Command::FreeParkingSpot),
            "GetParkingSpotById" => Some(Command::GetParkingSpotById),
            "GetParkingIntervalsByParkingSpotIdAndRegistrationPlate"
            | "GetParkingIntervalsByPlate" => Some(Command::GetParkingIntervalsByPlate),
            "CalculateTotal" => Some(Command::CalculateTotal),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateParkingSpot => "CreateParkingSpot",
            Command::ParkVehicle => "ParkVehicle",
            Command::FreeParkingSpot => "FreeParkingSpot",
            Command::GetParkingSpotById => "GetParkingSpotById",
            Command::GetParkingIntervalsByPlate => "GetParkingIntervalsByParkingSpotIdAndRegistrationPlate",
            Command::CalculateTotal => "CalculateTotal",
        }
    }

    /// Split a line into command + positional args.
    /// Returns None for an unknown command name.
    pub fn parse(line: &str) -> Option<(Command, Vec<String>)> {
        let mut parts = line.split(':');
        let command = Command::from_name(parts.next().unwrap_or_default())?;
        let args = parts.map(str::to_string).collect();
        Some((command, args))
    }

    pub fn execute(&self, registry: &mut ParkingRegistry, args: &[String]) -> String {
        match self {
            Command::CreateParkingSpot => registry.create_parking_spot(args),
            Command::ParkVehicle => registry.park_vehicle(args),
            Command::FreeParkingSpot => registry.free_parking_spot(args),
            Command::GetParkingSpotById => registry.get_parking_spot_by_id(args),
            Command::GetParkingIntervalsByPlate => registry.get_parking_intervals_by_plate(args),
            Command::CalculateTotal => registry.calculate_total(),
        }
    }
}

/// Run one line against the registry. Unknown commands produce an empty line.
pub fn dispatch(registry: &mut ParkingRegistry, line: &str) -> String {
    match Command::parse(line) {
        Some((command, args)) => {
            debug!("{} {:?}", command.name(), args);
            command.execute(registry, &args)
        }
        None => {
            warn!("Unknown command: {:?}", line);
            String::new()
        }
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Owns the registry for one run of the command loop
pub struct Session {
    registry: ParkingRegistry,
    processed: usize,
}

impl Session {
    pub fn new() -> Self {
        Session {
            registry: ParkingRegistry::new(),
            processed: 0,
        }
    }

    pub fn registry(&self) -> &ParkingRegistry {
        &self.registry
    }

    /// Number of commands handled so far
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Read commands until `End` or EOF, writing one result per command
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read command line")?;
            let line = line.trim_end_matches('\r');

            if line == END_SENTINEL {
                debug!("End of session after {} commands", self.processed);
                break;
            }

            let result = dispatch(&mut self.registry, line);
            self.processed += 1;

            writeln!(output, "{}", result).context("Failed to write command result")?;
        }

        output.flush().context("Failed to flush output")?;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        let mut session = Session::new();
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_splits_args() {
        let (command, args) = Command::parse("ParkVehicle:1:CA1234AB:3:car").unwrap();
        assert_eq!(command, Command::ParkVehicle);
        assert_eq!(args, vec!["1", "CA1234AB", "3", "car"]);

        let (command, args) = Command::parse("CalculateTotal").unwrap();
        assert_eq!(command, Command::CalculateTotal);
        assert!(args.is_empty());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(Command::parse("DeleteParkingSpot:1").is_none());
        assert!(Command::parse("").is_none());
        assert!(Command::parse("calculatetotal").is_none());
    }

    #[test]
    fn test_intervals_query_accepts_both_names() {
        assert_eq!(
            Command::from_name("GetParkingIntervalsByParkingSpotIdAndRegistrationPlate"),
            Some(Command::GetParkingIntervalsByPlate)
        );
        assert_eq!(
            Command::from_name("GetParkingIntervalsByPlate"),
            Some(Command::GetParkingIntervalsByPlate)
        );
    }

    #[test]
    fn test_car_scenario() {
        let output = run("CreateParkingSpot:1:false:car:2.50\n\
                          ParkVehicle:1:CA1234AB:3:car\n\
                          GetParkingSpotById:1\n\
                          CalculateTotal\n\
                          End\n");

        assert_eq!(
            output,
            "Parking spot 1 was successfully registered in the system!\n\
             Vehicle CA1234AB parked at 1 for 3 hours.\n\
             Parking Spot #1\nOccupied: True\nType: car\nPrice per hour: 2.50 BGN\n\
             Total revenue from the parking: 7.50 BGN\n"
        );
    }

    #[test]
    fn test_subscription_zero_price_scenario() {
        let output = run("CreateParkingSpot:2:false:subscription:0:AB1234CD\n\
                          GetParkingSpotById:2\n\
                          End\n");

        assert_eq!(
            output,
            "Unable to create parking spot!\n\
             Parking spot 2 not found!\n"
        );
    }

    #[test]
    fn test_stops_at_sentinel() {
        let mut session = Session::new();
        let mut out = Vec::new();
        session
            .run("CalculateTotal\nEnd\nCalculateTotal\n".as_bytes(), &mut out)
            .unwrap();

        assert_eq!(session.processed(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "Total revenue from the parking: 0.00 BGN\n");
    }

    #[test]
    fn test_runs_to_eof_without_sentinel() {
        let output = run("CreateParkingSpot:1:true:bus:3\r\nFreeParkingSpot:1\r\nFreeParkingSpot:1");
        assert_eq!(
            output,
            "Parking spot 1 was successfully registered in the system!\n\
             Parking spot 1 is now free!\n\
             Parking spot 1 is not occupied.\n"
        );
    }

    #[test]
    fn test_malformed_commands_do_not_end_session() {
        let output = run("Bogus:1\n\
                          ParkVehicle:abc\n\
                          CreateParkingSpot:1:false:car:1\n\
                          CreateParkingSpot:1:false:car:1\n\
                          End\n");

        assert_eq!(
            output,
            "\n\
             Unable to park vehicle!\n\
             Parking spot 1 was successfully registered in the system!\n\
             Parking spot 1 is already registered!\n"
        );
    }

    #[test]
    fn test_dispatch_keeps_registry_between_calls() {
        let mut registry = ParkingRegistry::new();
        dispatch(&mut registry, "CreateParkingSpot:3:false:subscription:4:AB1234CD");
        dispatch(&mut registry, "ParkVehicle:3:AB1234CD:10:anything");

        assert_eq!(
            dispatch(&mut registry, "GetParkingIntervalsByParkingSpotIdAndRegistrationPlate:3:ab1234cd"),
            "Parking Spot #3\nRegistrationPlate: AB1234CD\nHoursParked: 10\nRevenue: 0.00 BGN"
        );
        assert_eq!(
            dispatch(&mut registry, "CalculateTotal"),
            "Total revenue from the parking: 0.00 BGN"
        );
    }
}
