// 🗂️ Parking Registry - every spot, keyed by id
//
// Two layers:
// 1. Typed operations (`register`, `park`, `free`, ...) returning ParkingResult
// 2. The command contract: positional string args in, one result string out.
//    Nothing escapes layer 2 as an error - a malformed command must not end
//    the session.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;

use crate::entities::spot::same_ignoring_case;
use crate::entities::{ParkingInterval, ParkingSpot, SpotKind};
use crate::error::{ParkingError, ParkingResult};
use crate::money::format_bgn;

// Fallback lines for validation failures, one per command
pub const CREATE_FAILED: &str = "Unable to create parking spot!";
pub const PARK_FAILED: &str = "Unable to park vehicle!";
pub const FREE_FAILED: &str = "Unable to free parking spot!";
pub const LOOKUP_FAILED: &str = "Unable to get parking spot by id!";
pub const INTERVALS_FAILED: &str =
    "Unable to get parking intervals by parking spot id and registration plate!";

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Serializable view of the whole registry (for `--dump`)
#[derive(Debug, Serialize)]
pub struct RegistrySnapshot<'a> {
    pub taken_at: DateTime<Utc>,
    pub spot_count: usize,
    pub total_revenue: f64,
    pub spots: &'a [ParkingSpot],
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Spots in registration order, plus an id → position index
#[derive(Debug, Default)]
pub struct ParkingRegistry {
    spots: Vec<ParkingSpot>,
    index: HashMap<i32, usize>,
}

impl ParkingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.index.contains_key(&id)
    }

    /// All spots, in registration order
    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    /// Add a spot; ids are unique
    pub fn register(&mut self, spot: ParkingSpot) -> ParkingResult<()> {
        self.ensure_unused(spot.id())?;

        self.index.insert(spot.id(), self.spots.len());
        self.spots.push(spot);
        Ok(())
    }

    pub fn get(&self, id: i32) -> ParkingResult<&ParkingSpot> {
        self.index
            .get(&id)
            .and_then(|&pos| self.spots.get(pos))
            .ok_or(ParkingError::NotFound { id })
    }

    pub fn get_mut(&mut self, id: i32) -> ParkingResult<&mut ParkingSpot> {
        match self.index.get(&id) {
            Some(&pos) => self.spots.get_mut(pos).ok_or(ParkingError::NotFound { id }),
            None => Err(ParkingError::NotFound { id }),
        }
    }

    /// Admit a vehicle and commit the occupancy
    pub fn park(&mut self, id: i32, plate: &str, hours: i32, requested_kind: &str) -> ParkingResult<()> {
        let spot = self.get_mut(id)?;

        if !spot.park_vehicle(plate, hours, requested_kind)? {
            return Err(ParkingError::cannot_park(id, plate));
        }
        spot.occupied = true;
        Ok(())
    }

    pub fn free(&mut self, id: i32) -> ParkingResult<()> {
        let spot = self.get_mut(id)?;

        if !spot.occupied {
            return Err(ParkingError::not_occupied(id));
        }
        spot.occupied = false;
        Ok(())
    }

    pub fn intervals_for(&self, id: i32, plate: &str) -> ParkingResult<Vec<&ParkingInterval>> {
        Ok(self.get(id)?.intervals_for_plate(plate))
    }

    /// Sum of every spot's revenue (0 for an empty registry)
    pub fn total_revenue(&self) -> f64 {
        self.spots.iter().fold(0.0, |acc, spot| acc + spot.total_revenue())
    }

    pub fn snapshot(&self) -> RegistrySnapshot<'_> {
        RegistrySnapshot {
            taken_at: Utc::now(),
            spot_count: self.spots.len(),
            total_revenue: self.total_revenue(),
            spots: &self.spots,
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.snapshot()).context("Failed to serialize registry snapshot")
    }

    fn ensure_unused(&self, id: i32) -> ParkingResult<()> {
        if self.contains(id) {
            return Err(ParkingError::Conflict { id });
        }
        Ok(())
    }

    // ========================================================================
    // COMMAND CONTRACT (string args → result line)
    // ========================================================================

    /// `id, occupied, type, price[, bound_plate]`
    pub fn create_parking_spot(&mut self, args: &[String]) -> String {
        match self.try_create_parking_spot(args) {
            Ok(id) => {
                info!("Registered parking spot {}", id);
                format!("Parking spot {} was successfully registered in the system!", id)
            }
            Err(e) => report("CreateParkingSpot", e, CREATE_FAILED),
        }
    }

    fn try_create_parking_spot(&mut self, args: &[String]) -> ParkingResult<i32> {
        let id = parse_int(args, 0, "id")?;
        let occupied = parse_bool(args, 1, "occupied")?;
        let kind_name = arg(args, 2, "type")?;
        let price = parse_price(args, 3, "price")?;

        // Subscriptions read their plate before the duplicate check;
        // other kinds check the id before the kind name.
        let kind = if same_ignoring_case(kind_name, "subscription") {
            let bound_plate = arg(args, 4, "bound_plate")?;
            self.ensure_unused(id)?;
            SpotKind::Subscription {
                bound_plate: bound_plate.to_string(),
            }
        } else {
            self.ensure_unused(id)?;
            match kind_name.to_lowercase().as_str() {
                "car" => SpotKind::Car,
                "bus" => SpotKind::Bus,
                other => {
                    return Err(ParkingError::validation(
                        "type",
                        format!("Unknown parking spot type '{}'", other),
                    ))
                }
            }
        };

        self.register(ParkingSpot::new(id, occupied, kind, price)?)?;
        Ok(id)
    }

    /// `spot_id, plate, hours, type`
    pub fn park_vehicle(&mut self, args: &[String]) -> String {
        let parsed = parse_int(args, 0, "spot_id").and_then(|id| {
            let plate = arg(args, 1, "registration_plate")?;
            let hours = parse_int(args, 2, "hours_parked")?;
            let kind = arg(args, 3, "type")?;
            Ok((id, plate, hours, kind))
        });

        let result = parsed.and_then(|(id, plate, hours, kind)| {
            self.park(id, plate, hours, kind)?;
            Ok((id, plate, hours))
        });

        match result {
            Ok((id, plate, hours)) => {
                info!("Vehicle {} parked at spot {} for {}h", plate, id, hours);
                format!("Vehicle {} parked at {} for {} hours.", plate, id, hours)
            }
            Err(e) => report("ParkVehicle", e, PARK_FAILED),
        }
    }

    /// `spot_id`
    pub fn free_parking_spot(&mut self, args: &[String]) -> String {
        let result = parse_int(args, 0, "spot_id").and_then(|id| self.free(id).map(|_| id));

        match result {
            Ok(id) => {
                info!("Freed parking spot {}", id);
                format!("Parking spot {} is now free!", id)
            }
            Err(e) => report("FreeParkingSpot", e, FREE_FAILED),
        }
    }

    /// `spot_id`
    pub fn get_parking_spot_by_id(&self, args: &[String]) -> String {
        let result = parse_int(args, 0, "spot_id").and_then(|id| self.get(id));

        match result {
            Ok(spot) => spot.describe(),
            Err(e) => report("GetParkingSpotById", e, LOOKUP_FAILED),
        }
    }

    /// `spot_id, plate`
    pub fn get_parking_intervals_by_plate(&self, args: &[String]) -> String {
        let result = parse_int(args, 0, "spot_id").and_then(|id| {
            let plate = arg(args, 1, "registration_plate")?;
            let spot = self.get(id)?;
            Ok((spot, plate))
        });

        match result {
            Ok((spot, plate)) => {
                let intervals = spot.intervals_for_plate(plate);
                if intervals.is_empty() {
                    return format!(
                        "No parking intervals found for vehicle with registration plate {} on parking spot {}.",
                        plate,
                        spot.id()
                    );
                }

                intervals
                    .iter()
                    .map(|i| i.describe(spot))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Err(e) => report("GetParkingIntervalsByPlate", e, INTERVALS_FAILED),
        }
    }

    pub fn calculate_total(&self) -> String {
        format!("Total revenue from the parking: {}", format_bgn(self.total_revenue()))
    }
}

/// Turn a failed command into its result line
fn report(command: &str, err: ParkingError, fallback: &str) -> String {
    warn!("{} failed ({}): {}", command, err.kind(), err);

    match err {
        ParkingError::Validation { .. } => fallback.to_string(),
        other => other.to_string(),
    }
}

// ============================================================================
// ARGUMENT PARSING
// ============================================================================

fn arg<'a>(args: &'a [String], pos: usize, field: &str) -> ParkingResult<&'a str> {
    args.get(pos)
        .map(String::as_str)
        .ok_or_else(|| ParkingError::validation(field, format!("Missing argument #{}", pos + 1)))
}

fn parse_int(args: &[String], pos: usize, field: &str) -> ParkingResult<i32> {
    let raw = arg(args, pos, field)?;
    raw.trim()
        .parse::<i32>()
        .map_err(|e| ParkingError::validation(field, format!("'{}' is not an integer: {}", raw, e)))
}

fn parse_bool(args: &[String], pos: usize, field: &str) -> ParkingResult<bool> {
    let raw = arg(args, pos, field)?;
    let value = raw.trim();

    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParkingError::validation(field, format!("'{}' is not a boolean", raw)))
    }
}

fn parse_price(args: &[String], pos: usize, field: &str) -> ParkingResult<f64> {
    let raw = arg(args, pos, field)?;
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ParkingError::validation(field, format!("'{}' is not a number: {}", raw, e)))?;

    debug!("Parsed {} = {}", field, value);
    Ok(value)
}

// ============================================================================
// TESTS
// ============================================================================
