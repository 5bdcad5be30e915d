use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or stepping a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be finite and strictly positive.
    InvalidMass,
    /// A radius, width, height or depth was zero, negative or not finite.
    InvalidDimension,
    /// Restitution must lie in `[0, 1]`.
    InvalidRestitution,
    /// Indicates an invalid time value (e.g. a non-positive time step).
    InvalidTime,
    /// A configuration value was rejected; the message names the field.
    InvalidConfiguration(String),
    /// A zero-length vector was given where a direction is required.
    ZeroVector,
    /// No body is registered under the given handle.
    BodyNotFound(usize),
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidDimension => write!(f, "Invalid shape dimension"),
            PhysicsError::InvalidRestitution => write!(f, "Restitution must be between 0 and 1"),
            PhysicsError::InvalidTime => write!(f, "Invalid time value"),
            PhysicsError::InvalidConfiguration(field) => write!(f, "Invalid configuration: {}", field),
            PhysicsError::ZeroVector => write!(f, "Zero-length vector has no direction"),
            PhysicsError::BodyNotFound(handle) => write!(f, "No body with handle {}", handle),
            PhysicsError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}

impl Error for PhysicsError {}
