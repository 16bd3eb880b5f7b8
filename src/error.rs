// ⚠️ Parking Errors
// Every failure a registry operation can hit. The command layer turns
// these into fixed result strings, so none of them ever reaches the loop.

// ============================================================================
// ERROR KINDS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ParkingError {
    /// Bad numeric/boolean/kind argument, non-positive price or hours, empty plate
    Validation { field: String, message: String },

    /// A spot with this id is already registered
    Conflict { id: i32 },

    /// No spot with this id
    NotFound { id: i32 },

    /// Admission predicate failed, or the spot is already in the requested state
    Rejection { id: i32, message: String },
}

impl ParkingError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ParkingError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Admission refused for this plate
    pub fn cannot_park(id: i32, plate: &str) -> Self {
        ParkingError::Rejection {
            id,
            message: format!("Vehicle {} can't park at {}.", plate, id),
        }
    }

    /// Freeing a spot that is already free
    pub fn not_occupied(id: i32) -> Self {
        ParkingError::Rejection {
            id,
            message: format!("Parking spot {} is not occupied.", id),
        }
    }

    /// Short name of the error kind, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            ParkingError::Validation { .. } => "validation",
            ParkingError::Conflict { .. } => "conflict",
            ParkingError::NotFound { .. } => "not-found",
            ParkingError::Rejection { .. } => "rejection",
        }
    }
}

impl std::fmt::Display for ParkingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParkingError::Validation { field, message } => write!(f, "{}: {}", field, message),
            ParkingError::Conflict { id } => write!(f, "Parking spot {} is already registered!", id),
            ParkingError::NotFound { id } => write!(f, "Parking spot {} not found!", id),
            ParkingError::Rejection { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ParkingError {}

pub type ParkingResult<T> = Result<T, ParkingError>;
