//! Error type for the facility location core.
//!
//! Malformed input fails fast with a specific variant. An infeasible search
//! is *not* an error: it is reported through
//! [`SolveOutcome`](crate::models::SolveOutcome) with `None` fields.

use thiserror::Error;

/// Errors raised at the boundary of the solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("no demand points supplied")]
    EmptyInput,

    #[error("facility count must be at least 1, got {0}")]
    InvalidCount(usize),

    #[error("invalid coordinate at point {index}: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate {
        index: usize,
        latitude: f64,
        longitude: f64,
    },

    #[error("invalid weight at point {index}: {weight} (must be finite and non-negative)")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("invalid coverage radius {0} (must be finite and non-negative)")]
    InvalidRadius(f64),

    #[error("cannot evaluate coverage of {0} points with an empty facility set")]
    EmptyFacilitySet(usize),

    #[error("facility index {index} out of range for {size} points")]
    FacilityOutOfRange { index: usize, size: usize },

    #[error("facility index {0} appears more than once")]
    DuplicateFacility(usize),

    #[error("size mismatch: expected {expected} entries, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Shorthand result type for the crate.
pub type LocationResult<T> = Result<T, LocationError>;
