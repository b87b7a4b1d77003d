//! Coverage sweep across a range of facility counts.
//!
//! Each `k` is independent and reads the same immutable matrix, so the
//! sweep runs all trials in parallel. Its main use is auditing the
//! monotonicity assumption behind binary search on a concrete instance.

use std::ops::RangeInclusive;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constructive::{greedy_centers, SelectionRule};
use crate::distance::DistanceMatrix;
use crate::error::{LocationError, LocationResult};
use crate::evaluation::CoverageEvaluator;
use crate::models::{CoverageResult, FacilitySet};

/// Selection and coverage for one facility count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Requested facility count.
    pub k: usize,
    /// Greedy selection for `k`.
    pub facilities: FacilitySet,
    /// Coverage of that selection.
    pub coverage: CoverageResult,
}

/// A drop in coverage when one more facility was allowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonotonicityViolation {
    /// The smaller facility count.
    pub k: usize,
    /// Coverage fraction at `k`.
    pub fraction: f64,
    /// Coverage fraction at `k + 1`.
    pub next_fraction: f64,
}

/// Runs selection and evaluation for every `k` in `ks`.
///
/// Results are ordered by `k`.
///
/// # Errors
///
/// - [`LocationError::InvalidCount`] if the range starts at 0
/// - any selector or evaluator error
///
/// # Examples
///
/// ```
/// use u_location::models::DemandPoint;
/// use u_location::distance::{DistanceMatrix, DistanceMetric};
/// use u_location::constructive::SelectionRule;
/// use u_location::search::coverage_sweep;
///
/// let points = vec![
///     DemandPoint::new(0.0, 0.0, 1.0),
///     DemandPoint::new(0.0, 5.0, 1.0),
///     DemandPoint::new(0.0, 9.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, DistanceMetric::Euclidean).unwrap();
///
/// let sweep = coverage_sweep(&dm, &[1.0; 3], SelectionRule::Weighted, 1.0, 1..=3).unwrap();
/// assert_eq!(sweep.len(), 3);
/// assert_eq!(sweep[2].coverage.coverage_fraction, 1.0);
/// ```
pub fn coverage_sweep(
    distances: &DistanceMatrix,
    weights: &[f64],
    rule: SelectionRule,
    radius: f64,
    ks: RangeInclusive<usize>,
) -> LocationResult<Vec<SweepPoint>> {
    if *ks.start() == 0 {
        return Err(LocationError::InvalidCount(0));
    }
    let evaluator = CoverageEvaluator::new(distances);
    ks.into_par_iter()
        .map(|k| -> LocationResult<SweepPoint> {
            let facilities = greedy_centers(k, distances, weights, rule)?;
            let coverage = evaluator.evaluate(&facilities, radius)?;
            Ok(SweepPoint {
                k,
                facilities,
                coverage,
            })
        })
        .collect()
}

/// Lists every adjacent pair in `sweep` where coverage fell as `k` grew.
///
/// Violations are logged as warnings; they indicate that binary search may
/// overshoot the true minimum on this instance.
pub fn monotonicity_violations(sweep: &[SweepPoint]) -> Vec<MonotonicityViolation> {
    let violations: Vec<MonotonicityViolation> = sweep
        .windows(2)
        .filter(|w| w[1].k == w[0].k + 1)
        .filter(|w| w[1].coverage.coverage_fraction < w[0].coverage.coverage_fraction)
        .map(|w| MonotonicityViolation {
            k: w[0].k,
            fraction: w[0].coverage.coverage_fraction,
            next_fraction: w[1].coverage.coverage_fraction,
        })
        .collect();

    for v in &violations {
        tracing::warn!(
            k = v.k,
            fraction = v.fraction,
            next_fraction = v.next_fraction,
            "coverage decreased with one more facility"
        );
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMetric;
    use crate::models::DemandPoint;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sweep_point(k: usize, fraction: f64) -> SweepPoint {
        SweepPoint {
            k,
            facilities: FacilitySet::new(),
            coverage: CoverageResult {
                radius: 1.0,
                max_distance: 0.0,
                avg_distance: 0.0,
                covered_count: 0,
                total_count: 0,
                coverage_fraction: fraction,
                assignments: vec![],
            },
        }
    }

    #[test]
    fn test_sweep_ordered_by_k() {
        let points: Vec<DemandPoint> = (0..8)
            .map(|i| DemandPoint::new(0.0, i as f64 * 3.0, 1.0))
            .collect();
        let dm = DistanceMatrix::from_points(&points, DistanceMetric::Euclidean).expect("valid");
        let sweep = coverage_sweep(&dm, &[1.0; 8], SelectionRule::Weighted, 1.0, 2..=6)
            .expect("valid");
        let ks: Vec<usize> = sweep.iter().map(|s| s.k).collect();
        assert_eq!(ks, vec![2, 3, 4, 5, 6]);
        for s in &sweep {
            assert_eq!(s.facilities.len(), s.k);
            // Points 3 apart: only facilities themselves are covered.
            assert_eq!(s.coverage.covered_count, s.k);
        }
    }

    #[test]
    fn test_sweep_rejects_zero() {
        let dm = DistanceMatrix::new(1);
        assert_eq!(
            coverage_sweep(&dm, &[1.0], SelectionRule::Weighted, 1.0, 0..=2).unwrap_err(),
            LocationError::InvalidCount(0)
        );
    }

    #[test]
    fn test_violations_detected() {
        let sweep = vec![sweep_point(1, 0.5), sweep_point(2, 0.75), sweep_point(3, 0.6)];
        let violations = monotonicity_violations(&sweep);
        assert_eq!(
            violations,
            vec![MonotonicityViolation {
                k: 2,
                fraction: 0.75,
                next_fraction: 0.6
            }]
        );
    }

    #[test]
    fn test_non_adjacent_ks_ignored() {
        let sweep = vec![sweep_point(1, 0.9), sweep_point(3, 0.5)];
        assert!(monotonicity_violations(&sweep).is_empty());
    }

    #[test]
    fn test_randomized_monotonicity_audit() {
        // Monotonicity is not guaranteed; counterexamples are reported, not failed.
        let mut rng = StdRng::seed_from_u64(7);
        let mut flagged = 0;
        for _ in 0..20 {
            let n = rng.random_range(5..40);
            let points: Vec<DemandPoint> = (0..n)
                .map(|_| {
                    DemandPoint::new(
                        rng.random_range(40.5..40.9),
                        rng.random_range(-74.2..-73.7),
                        rng.random_range(0.0..5.0),
                    )
                })
                .collect();
            let weights: Vec<f64> = points.iter().map(|p| p.weight()).collect();
            let dm = DistanceMatrix::from_points(&points, DistanceMetric::Haversine)
                .expect("valid");
            let radius = rng.random_range(2.0..15.0);

            let sweep = coverage_sweep(&dm, &weights, SelectionRule::Weighted, radius, 1..=n)
                .expect("valid");
            assert_eq!(sweep.len(), n);
            assert_eq!(sweep[n - 1].coverage.coverage_fraction, 1.0);
            for s in &sweep {
                assert!((0.0..=1.0).contains(&s.coverage.coverage_fraction));
            }
            flagged += monotonicity_violations(&sweep).len();
        }
        if flagged > 0 {
            eprintln!("monotonicity audit flagged {flagged} coverage drops");
        }
    }
}
