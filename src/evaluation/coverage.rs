//! Coverage evaluator over a precomputed distance matrix.

use rayon::prelude::*;

use crate::distance::DistanceMatrix;
use crate::error::{LocationError, LocationResult};
use crate::models::{CoverageResult, FacilitySet};

/// Evaluates how well a facility set covers every demand point.
///
/// Only reads the session's distance matrix; no geodesic distance is
/// recomputed.
///
/// # Examples
///
/// ```
/// use u_location::models::{DemandPoint, FacilitySet};
/// use u_location::distance::{DistanceMatrix, DistanceMetric};
/// use u_location::evaluation::CoverageEvaluator;
///
/// let points = vec![
///     DemandPoint::new(0.0, 0.0, 1.0),
///     DemandPoint::new(3.0, 4.0, 1.0),
///     DemandPoint::new(6.0, 8.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, DistanceMetric::Euclidean).unwrap();
/// let facilities = FacilitySet::from_indices(vec![1], 3).unwrap();
///
/// let evaluator = CoverageEvaluator::new(&dm);
/// let coverage = evaluator.evaluate(&facilities, 5.0).unwrap();
/// assert_eq!(coverage.covered_count, 3);
/// assert!(coverage.is_feasible());
/// ```
pub struct CoverageEvaluator<'a> {
    distances: &'a DistanceMatrix,
}

impl<'a> CoverageEvaluator<'a> {
    /// Creates an evaluator over the given matrix.
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self { distances }
    }

    /// Computes per-point nearest-facility distances and aggregate metrics.
    ///
    /// A point is covered iff its nearest facility is at distance `<= radius`.
    ///
    /// # Errors
    ///
    /// - [`LocationError::InvalidRadius`] if `radius` is negative or not finite
    /// - [`LocationError::EmptyFacilitySet`] if there are points but no facilities
    /// - [`LocationError::FacilityOutOfRange`] for an index outside the matrix
    pub fn evaluate(&self, facilities: &FacilitySet, radius: f64) -> LocationResult<CoverageResult> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(LocationError::InvalidRadius(radius));
        }
        let n = self.distances.size();
        if let Some(&index) = facilities.indices().iter().find(|&&f| f >= n) {
            return Err(LocationError::FacilityOutOfRange { index, size: n });
        }
        if n == 0 {
            return Ok(CoverageResult {
                radius,
                max_distance: 0.0,
                avg_distance: 0.0,
                covered_count: 0,
                total_count: 0,
                coverage_fraction: 1.0,
                assignments: Vec::new(),
            });
        }
        if facilities.is_empty() {
            return Err(LocationError::EmptyFacilitySet(n));
        }

        let nearest: Vec<(usize, f64)> = (0..n)
            .into_par_iter()
            .map(|i| {
                self.distances
                    .nearest_of(i, facilities.indices())
                    .expect("facility set is non-empty")
            })
            .collect();

        let mut max_distance: f64 = 0.0;
        let mut total = 0.0;
        let mut covered_count = 0;
        let mut assignments = Vec::with_capacity(n);
        for &(facility, d) in &nearest {
            max_distance = max_distance.max(d);
            total += d;
            if d <= radius {
                covered_count += 1;
            }
            assignments.push(facility);
        }

        Ok(CoverageResult {
            radius,
            max_distance,
            avg_distance: total / n as f64,
            covered_count,
            total_count: n,
            coverage_fraction: covered_count as f64 / n as f64,
            assignments,
        })
    }

    /// Returns `true` if every point lies within `radius` of a facility.
    pub fn is_feasible(&self, facilities: &FacilitySet, radius: f64) -> LocationResult<bool> {
        Ok(self.evaluate(facilities, radius)?.is_feasible())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMetric;
    use crate::models::DemandPoint;

    fn setup() -> DistanceMatrix {
        let points = vec![
            DemandPoint::new(0.0, 0.0, 1.0),
            DemandPoint::new(0.0, 1.0, 1.0),
            DemandPoint::new(0.0, 2.0, 1.0),
            DemandPoint::new(0.0, 10.0, 1.0),
        ];
        DistanceMatrix::from_points(&points, DistanceMetric::Euclidean).expect("valid")
    }

    #[test]
    fn test_metrics() {
        let dm = setup();
        let eval = CoverageEvaluator::new(&dm);
        let facilities = FacilitySet::from_indices(vec![1], 4).expect("valid");
        let c = eval.evaluate(&facilities, 1.5).expect("valid");
        assert_eq!(c.total_count, 4);
        assert_eq!(c.covered_count, 3);
        assert!((c.max_distance - 9.0).abs() < 1e-10);
        // (1 + 0 + 1 + 9) / 4
        assert!((c.avg_distance - 2.75).abs() < 1e-10);
        assert!((c.coverage_fraction - 0.75).abs() < 1e-10);
        assert!(!c.is_feasible());
        assert_eq!(c.assignments, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_assignments_pick_nearest() {
        let dm = setup();
        let eval = CoverageEvaluator::new(&dm);
        let facilities = FacilitySet::from_indices(vec![0, 3], 4).expect("valid");
        let c = eval.evaluate(&facilities, 2.0).expect("valid");
        assert_eq!(c.assignments, vec![0, 0, 0, 3]);
        assert!(c.is_feasible());
    }

    #[test]
    fn test_radius_boundary_is_covered() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        let eval = CoverageEvaluator::new(&dm);
        let facilities = FacilitySet::from_indices(vec![0], 2).expect("valid");
        let c = eval.evaluate(&facilities, 5.0).expect("valid");
        assert_eq!(c.covered_count, 2);
        assert!(c.is_feasible());
        assert!(!eval.is_feasible(&facilities, 4.999).expect("valid"));
    }

    #[test]
    fn test_empty_facility_set() {
        let dm = setup();
        let eval = CoverageEvaluator::new(&dm);
        assert_eq!(
            eval.evaluate(&FacilitySet::new(), 1.0),
            Err(LocationError::EmptyFacilitySet(4))
        );
    }

    #[test]
    fn test_no_points_is_vacuously_covered() {
        let dm = DistanceMatrix::new(0);
        let eval = CoverageEvaluator::new(&dm);
        let c = eval.evaluate(&FacilitySet::new(), 1.0).expect("valid");
        assert_eq!(c.total_count, 0);
        assert_eq!(c.coverage_fraction, 1.0);
        assert!(c.is_feasible());
    }

    #[test]
    fn test_invalid_radius() {
        let dm = setup();
        let eval = CoverageEvaluator::new(&dm);
        let facilities = FacilitySet::from_indices(vec![0], 4).expect("valid");
        assert_eq!(
            eval.evaluate(&facilities, -1.0),
            Err(LocationError::InvalidRadius(-1.0))
        );
        assert!(eval.evaluate(&facilities, f64::NAN).is_err());
    }

    #[test]
    fn test_facility_out_of_range() {
        let dm = setup();
        let eval = CoverageEvaluator::new(&dm);
        let facilities = FacilitySet::from_indices(vec![7], 8).expect("valid for 8");
        assert_eq!(
            eval.evaluate(&facilities, 1.0),
            Err(LocationError::FacilityOutOfRange { index: 7, size: 4 })
        );
    }
}
