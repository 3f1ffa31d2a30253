//! Errors raised while building bodies and configuring the engine.
//!
//! Stepping never fails; everything that can go wrong is caught here, before
//! the first step.

use std::fmt;

pub type PhysicsResult<T> = Result<T, PhysicsError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A shape dimension (radius, width, height) was not a positive finite number.
    InvalidDimension { what: &'static str, value: f64 },
    /// Density must be positive; `f64::INFINITY` marks an immovable body.
    InvalidDensity(f64),
    /// A kinematic quantity (position, rotation, velocity) was NaN or infinite.
    NonFiniteState { what: &'static str },
    /// Restitution or friction outside its valid range.
    InvalidMaterial { what: &'static str, value: f64 },
    InvalidConfig { what: &'static str, value: f64 },
    BodyIndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidDimension { what, value } => {
                write!(f, "{} must be positive and finite, got {}", what, value)
            }
            PhysicsError::InvalidDensity(value) => {
                write!(
                    f,
                    "density must be positive (or infinite for immovable bodies), got {}",
                    value
                )
            }
            PhysicsError::NonFiniteState { what } => write!(f, "{} must be finite", what),
            PhysicsError::InvalidMaterial { what, value } => {
                write!(f, "invalid {} coefficient {}", what, value)
            }
            PhysicsError::InvalidConfig { what, value } => {
                write!(f, "invalid engine setting {}: {}", what, value)
            }
            PhysicsError::BodyIndexOutOfRange { index, len } => {
                write!(f, "body index {} out of range for {} bodies", index, len)
            }
        }
    }
}

impl std::error::Error for PhysicsError {}

/// Rejects zero, negative, NaN and infinite dimensions.
pub(crate) fn check_dimension(what: &'static str, value: f64) -> PhysicsResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidDimension { what, value })
    }
}
