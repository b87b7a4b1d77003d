//! Geodesic distances and the per-session distance matrix.
//!
//! - [`geo`] — Haversine, Vincenty and planar point-to-point distance
//! - [`DistanceMatrix`] — Dense symmetric matrix built once per solve

pub mod geo;
mod matrix;

pub use geo::{haversine_km, vincenty_km, DistanceMetric, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
