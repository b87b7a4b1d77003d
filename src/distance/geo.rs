//! Surface distance between latitude/longitude pairs.
//!
//! All functions take coordinates in degrees and return kilometers.

use serde::{Deserialize, Serialize};

use crate::error::{LocationError, LocationResult};

/// Mean Earth radius (IUGG), kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// WGS-84 semi-major axis, meters.
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_TOLERANCE: f64 = 1e-12;

/// How pairwise distances between demand points are measured.
///
/// # Examples
///
/// ```
/// use u_location::distance::DistanceMetric;
///
/// // One degree of longitude on the equator.
/// let d = DistanceMetric::Haversine.distance((0.0, 0.0), (0.0, 1.0));
/// assert!((d - 111.195).abs() < 0.01);
///
/// let planar = DistanceMetric::Euclidean.distance((0.0, 0.0), (3.0, 4.0));
/// assert_eq!(planar, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Great-circle distance on a sphere of radius [`EARTH_RADIUS_KM`].
    #[default]
    Haversine,
    /// Vincenty inverse formula on the WGS-84 ellipsoid.
    ///
    /// Falls back to haversine for the rare near-antipodal pairs where the
    /// iteration does not converge.
    Vincenty,
    /// Planar distance treating `(latitude, longitude)` as plain `(y, x)`
    /// units. Only meaningful for synthetic inputs.
    Euclidean,
}

impl DistanceMetric {
    /// Distance between two `(latitude, longitude)` pairs.
    ///
    /// Coordinates are assumed valid; see [`DistanceMetric::check`].
    pub fn distance(self, a: (f64, f64), b: (f64, f64)) -> f64 {
        match self {
            DistanceMetric::Haversine => haversine_km(a, b),
            DistanceMetric::Vincenty => vincenty_km(a, b).unwrap_or_else(|| {
                tracing::warn!(?a, ?b, "vincenty did not converge, using haversine");
                haversine_km(a, b)
            }),
            DistanceMetric::Euclidean => {
                let dy = a.0 - b.0;
                let dx = a.1 - b.1;
                (dx * dx + dy * dy).sqrt()
            }
        }
    }

    /// Returns `true` if this metric treats coordinates as degrees on the
    /// globe.
    pub fn is_geodesic(self) -> bool {
        !matches!(self, DistanceMetric::Euclidean)
    }

    /// Validates a coordinate for this metric.
    ///
    /// Geodesic metrics require latitude in [-90, 90] and longitude in
    /// [-180, 180]. All metrics reject non-finite values. `index` is the
    /// position reported in the error.
    pub fn check(self, index: usize, latitude: f64, longitude: f64) -> LocationResult<()> {
        let finite = latitude.is_finite() && longitude.is_finite();
        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !finite || (self.is_geodesic() && !in_range) {
            return Err(LocationError::InvalidCoordinate {
                index,
                latitude,
                longitude,
            });
        }
        Ok(())
    }
}

/// Haversine great-circle distance in kilometers.
///
/// Exactly symmetric in its arguments and zero for identical points.
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = a;
    let (lat2, lon2) = b;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon * 0.5).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}

/// Vincenty inverse distance on the WGS-84 ellipsoid in kilometers.
///
/// Returns `None` if the iteration fails to converge (nearly antipodal
/// points).
///
/// # Reference
///
/// Vincenty, T. (1975). "Direct and Inverse Solutions of Geodesics on the
/// Ellipsoid with application of nested equations", *Survey Review* 23(176),
/// 88-93.
pub fn vincenty_km(a: (f64, f64), b: (f64, f64)) -> Option<f64> {
    let f = WGS84_F;
    let semi_minor = (1.0 - f) * WGS84_A;

    let l = (b.1 - a.1).to_radians();
    let u1 = ((1.0 - f) * a.0.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * b.0.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut converged = false;
    let (mut sin_sigma, mut cos_sigma, mut sigma) = (0.0, 0.0, 0.0);
    let (mut cos_sq_alpha, mut cos_2sigma_m) = (0.0, 0.0);

    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let t1 = cos_u2 * sin_lambda;
        let t2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        sin_sigma = (t1 * t1 + t2 * t2).sqrt();
        if sin_sigma == 0.0 {
            // coincident
            return Some(0.0);
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial line: cos_sq_alpha == 0.
        cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
        if (lambda - previous).abs() < VINCENTY_TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        return None;
    }

    let a_sq = WGS84_A * WGS84_A;
    let b_sq = semi_minor * semi_minor;
    let u_sq = cos_sq_alpha * (a_sq - b_sq) / b_sq;
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let c2m_sq = cos_2sigma_m * cos_2sigma_m;
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * c2m_sq)
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * c2m_sq)));

    let meters = semi_minor * big_a * (sigma - delta_sigma);
    Some(meters / 1000.0)
}
