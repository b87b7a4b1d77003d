//! Demand point type.

use serde::{Deserialize, Serialize};

use crate::error::{LocationError, LocationResult};

/// A weighted location that requires service coverage.
///
/// The weight expresses relative importance (for example population
/// density) and must be finite and non-negative; see
/// [`validate_weights`]. A point's identity inside a solve is its position
/// in the input slice.
///
/// # Examples
///
/// ```
/// use u_location::models::DemandPoint;
///
/// let p = DemandPoint::new(40.7128, -74.006, 2.5);
/// assert_eq!(p.latitude(), 40.7128);
/// assert_eq!(p.weight(), 2.5);
///
/// let q = DemandPoint::unweighted(40.7, -74.0);
/// assert_eq!(q.weight(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    latitude: f64,
    longitude: f64,
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl DemandPoint {
    /// Creates a demand point at `(latitude, longitude)` degrees.
    pub fn new(latitude: f64, longitude: f64, weight: f64) -> Self {
        Self {
            latitude,
            longitude,
            weight,
        }
    }

    /// Creates a demand point with weight 1.0.
    pub fn unweighted(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, 1.0)
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Relative importance of this point.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// `(latitude, longitude)` pair.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Checks that every weight is finite and non-negative.
///
/// Reports the first offending position.
pub fn validate_weights(weights: &[f64]) -> LocationResult<()> {
    match weights
        .iter()
        .position(|w| !w.is_finite() || *w < 0.0)
    {
        Some(index) => Err(LocationError::InvalidWeight {
            index,
            weight: weights[index],
        }),
        None => Ok(()),
    }
}
