//! Zone density with exponential decay around zone centers.

use serde::{Deserialize, Serialize};

use super::WeightModel;

/// Default decay rate, per degree of planar distance.
const DEFAULT_DECAY_PER_DEGREE: f64 = 100.0;

/// A zone (for example a borough) with a population density and one or more
/// activity centers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityZone {
    /// Display name.
    pub name: String,
    /// Population density, any consistent unit.
    pub density: f64,
    /// `(latitude, longitude)` of the zone's centers.
    pub centers: Vec<(f64, f64)>,
}

impl DensityZone {
    /// Creates a zone.
    pub fn new(name: impl Into<String>, density: f64, centers: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            density,
            centers,
        }
    }

    /// Planar distance in degrees from a location to the nearest center.
    fn nearest_center(&self, latitude: f64, longitude: f64) -> f64 {
        self.centers
            .iter()
            .map(|&(clat, clon)| ((latitude - clat).powi(2) + (longitude - clon).powi(2)).sqrt())
            .fold(f64::INFINITY, f64::min)
    }
}

/// Density weighting with a boost that decays away from zone centers.
///
/// A location belongs to the zone whose nearest center is closest. Its
/// weight is `density / max_density × (1 + exp(-d × decay))`, where `d` is
/// the planar distance in degrees to that center. Weights therefore lie in
/// `[0, 2]`.
///
/// # Examples
///
/// ```
/// use u_location::weighting::{DensityDecay, DensityZone, WeightModel};
///
/// let model = DensityDecay::new(vec![
///     DensityZone::new("dense", 70_000.0, vec![(40.75, -73.99)]),
///     DensityZone::new("sparse", 10_000.0, vec![(40.58, -74.15)]),
/// ]);
/// let downtown = model.weight(40.75, -73.99);
/// let island = model.weight(40.58, -74.15);
/// assert!((downtown - 2.0).abs() < 1e-12);
/// assert!(island < downtown);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityDecay {
    zones: Vec<DensityZone>,
    decay_per_degree: f64,
    max_density: f64,
}

impl DensityDecay {
    /// Creates a model over the given zones with the default decay of 100
    /// per degree.
    pub fn new(zones: Vec<DensityZone>) -> Self {
        let max_density = zones.iter().map(|z| z.density).fold(0.0, f64::max);
        Self {
            zones,
            decay_per_degree: DEFAULT_DECAY_PER_DEGREE,
            max_density,
        }
    }

    /// Sets the decay rate per degree.
    pub fn with_decay(mut self, decay_per_degree: f64) -> Self {
        self.decay_per_degree = decay_per_degree;
        self
    }

    /// The zones of this model.
    pub fn zones(&self) -> &[DensityZone] {
        &self.zones
    }

    /// Weight of a location known to lie in zone `zone`.
    ///
    /// Returns 0.0 for an unknown zone index.
    pub fn weight_in_zone(&self, zone: usize, latitude: f64, longitude: f64) -> f64 {
        match self.zones.get(zone) {
            Some(z) => self.zone_weight(z, z.nearest_center(latitude, longitude)),
            None => 0.0,
        }
    }

    fn zone_weight(&self, zone: &DensityZone, distance: f64) -> f64 {
        if self.max_density <= 0.0 {
            return 0.0;
        }
        let base = zone.density / self.max_density;
        // No centers: no boost.
        let boost = if distance.is_finite() {
            (-distance * self.decay_per_degree).exp()
        } else {
            0.0
        };
        base * (1.0 + boost)
    }
}

impl WeightModel for DensityDecay {
    fn weight(&self, latitude: f64, longitude: f64) -> f64 {
        let nearest = self
            .zones
            .iter()
            .map(|z| (z, z.nearest_center(latitude, longitude)))
            .fold(None, |best: Option<(&DensityZone, f64)>, (z, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((z, d)),
            });
        match nearest {
            Some((zone, d)) => self.zone_weight(zone, d),
            None => 0.0,
        }
    }
}
