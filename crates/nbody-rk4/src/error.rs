//! Error types for simulation setup and scenario loading
//!
//! Only configuration problems are errors. Degenerate geometry (two bodies
//! at the same point) is not: it shows up as non-finite values in the
//! vector field and the trajectory.

use thiserror::Error;

/// Errors reported before any integration step is taken
#[derive(Debug, Error)]
pub enum NBodyError {
    /// A body mass is zero, negative, or not a finite number
    #[error("body `{name}` has invalid mass {mass} (must be finite and > 0)")]
    NonPositiveMass { name: String, mass: f64 },

    /// The mass list does not line up with the bodies in the state vector
    #[error("mass list has {masses} entries but the state describes {bodies} bodies")]
    MassCountMismatch { bodies: usize, masses: usize },

    /// A flat state vector has the wrong length for the body count
    #[error("state vector has length {actual}, expected {expected}")]
    StateLengthMismatch { expected: usize, actual: usize },

    #[error("step size {0} must be finite and positive")]
    InvalidStepSize(f64),

    #[error("invalid time grid: {0}")]
    InvalidTimeGrid(String),

    #[error("invalid reference scale: {0}")]
    InvalidReferenceScale(String),

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NBodyError>;
