//! Weighting adapters that turn raw coordinates into demand points.
//!
//! The solver only sees an opaque per-point weight. Density models live here
//! behind the [`WeightModel`] trait so ingestion strategies can be swapped
//! without touching the core.
//!
//! - [`UniformWeight`] — Same weight everywhere
//! - [`DensityDecay`] — Zone density boosted near zone centers

mod density;

pub use density::{DensityDecay, DensityZone};

use crate::models::DemandPoint;

/// Assigns a weight to a `(latitude, longitude)` location.
///
/// # Examples
///
/// ```
/// use u_location::weighting::{UniformWeight, WeightModel};
///
/// let points = UniformWeight(2.0).demand_points(&[(40.7, -74.0), (40.8, -73.9)]);
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[1].weight(), 2.0);
/// ```
pub trait WeightModel: Send + Sync {
    /// Weight of a point at the given coordinates.
    fn weight(&self, latitude: f64, longitude: f64) -> f64;

    /// Builds weighted demand points from raw coordinates, preserving order.
    fn demand_points(&self, coordinates: &[(f64, f64)]) -> Vec<DemandPoint> {
        coordinates
            .iter()
            .map(|&(lat, lon)| DemandPoint::new(lat, lon, self.weight(lat, lon)))
            .collect()
    }
}

/// Constant weight for every point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformWeight(pub f64);

impl Default for UniformWeight {
    fn default() -> Self {
        Self(1.0)
    }
}

impl WeightModel for UniformWeight {
    fn weight(&self, _latitude: f64, _longitude: f64) -> f64 {
        self.0
    }
}
