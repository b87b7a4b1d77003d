//! Solve sessions and the top-level entry point.
//!
//! A [`SolveSession`] owns the one distance matrix of a solve and lends it
//! read-only to selection, evaluation, search and sweep, so every phase sees
//! the same distances. [`Solver::solve`] is the single entry point used by
//! ingestion and presentation collaborators.

use std::ops::RangeInclusive;
use std::time::Instant;

use crate::config::SolverConfig;
use crate::constructive::greedy_centers;
use crate::distance::DistanceMatrix;
use crate::error::{LocationError, LocationResult};
use crate::evaluation::CoverageEvaluator;
use crate::models::{validate_weights, CoverageResult, DemandPoint, FacilitySet, Solution};
use crate::search::{coverage_sweep, MinCardinalitySearch, SearchReport, SweepPoint};

/// Distance matrix, weights and configuration for one point set.
///
/// # Examples
///
/// ```
/// use u_location::{SolveSession, SolverConfig};
/// use u_location::distance::DistanceMetric;
/// use u_location::models::DemandPoint;
///
/// let points = vec![
///     DemandPoint::new(0.0, 0.0, 1.0),
///     DemandPoint::new(0.0, 4.0, 1.0),
/// ];
/// let config = SolverConfig::default().with_metric(DistanceMetric::Euclidean);
/// let session = SolveSession::new(&points, config).unwrap();
///
/// let facilities = session.select(1).unwrap();
/// let coverage = session.evaluate(&facilities, 4.0).unwrap();
/// assert!(coverage.is_feasible());
/// ```
#[derive(Debug)]
pub struct SolveSession<'p> {
    points: &'p [DemandPoint],
    weights: Vec<f64>,
    distances: DistanceMatrix,
    config: SolverConfig,
}

impl<'p> SolveSession<'p> {
    /// Validates the points and builds the session's distance matrix.
    ///
    /// # Errors
    ///
    /// - [`LocationError::EmptyInput`] if `points` is empty
    /// - [`LocationError::InvalidWeight`] for a negative or non-finite weight
    /// - [`LocationError::InvalidCoordinate`] for a coordinate the metric rejects
    pub fn new(points: &'p [DemandPoint], config: SolverConfig) -> LocationResult<Self> {
        if points.is_empty() {
            return Err(LocationError::EmptyInput);
        }
        let weights: Vec<f64> = points.iter().map(|p| p.weight()).collect();
        validate_weights(&weights)?;

        let started = Instant::now();
        let distances = DistanceMatrix::from_points(points, config.metric)?;
        tracing::debug!(
            points = points.len(),
            metric = ?config.metric,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "distance matrix built"
        );

        Ok(Self {
            points,
            weights,
            distances,
            config,
        })
    }

    /// The demand points of this session.
    pub fn points(&self) -> &[DemandPoint] {
        self.points
    }

    /// Per-point weights, in point order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The session's distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Greedy selection of `min(k, N)` facilities.
    pub fn select(&self, k: usize) -> LocationResult<FacilitySet> {
        greedy_centers(k, &self.distances, &self.weights, self.config.rule)
    }

    /// Coverage of `facilities` at `radius`.
    pub fn evaluate(&self, facilities: &FacilitySet, radius: f64) -> LocationResult<CoverageResult> {
        CoverageEvaluator::new(&self.distances).evaluate(facilities, radius)
    }

    /// Runs the configured minimum-cardinality search.
    pub fn search(&self, max_centers: usize, radius: f64) -> LocationResult<SearchReport> {
        let mut search = MinCardinalitySearch::new(&self.distances, &self.weights)
            .with_rule(self.config.rule)
            .with_strategy(self.config.strategy);
        if let Some(budget) = self.config.time_budget {
            search = search.with_time_budget(budget);
        }
        search.run(max_centers, radius)
    }

    /// Coverage for every facility count in `ks`.
    pub fn sweep(&self, radius: f64, ks: RangeInclusive<usize>) -> LocationResult<Vec<SweepPoint>> {
        coverage_sweep(&self.distances, &self.weights, self.config.rule, radius, ks)
    }
}

/// Facility location solver.
///
/// # Examples
///
/// ```
/// use u_location::{Solver, SolverConfig};
/// use u_location::models::DemandPoint;
///
/// // Two neighbourhoods roughly 20 km apart.
/// let points = vec![
///     DemandPoint::new(40.75, -73.99, 3.0),
///     DemandPoint::new(40.76, -73.98, 1.0),
///     DemandPoint::new(40.65, -73.80, 2.0),
///     DemandPoint::new(40.66, -73.79, 1.0),
/// ];
/// let solver = Solver::new(SolverConfig::default());
/// let solution = solver.solve(&points, 5.0, 4).unwrap();
/// assert_eq!(solution.min_centers(), Some(2));
/// assert_eq!(solution.facilities.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds the fewest facilities within `radius_km` of every point.
    ///
    /// Facility coordinates in the returned [`Solution`] are copied from
    /// `points`. An infeasible search is reported through
    /// [`Solution::min_centers`] being `None`, not as an error.
    ///
    /// # Errors
    ///
    /// - [`LocationError::EmptyInput`] if `points` is empty
    /// - [`LocationError::InvalidCount`] if `max_centers == 0`
    /// - [`LocationError::InvalidRadius`] unless `radius_km` is finite and positive
    /// - [`LocationError::InvalidWeight`] / [`LocationError::InvalidCoordinate`]
    ///   for malformed points
    pub fn solve(
        &self,
        points: &[DemandPoint],
        radius_km: f64,
        max_centers: usize,
    ) -> LocationResult<Solution> {
        if points.is_empty() {
            return Err(LocationError::EmptyInput);
        }
        if max_centers < 1 {
            return Err(LocationError::InvalidCount(max_centers));
        }
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(LocationError::InvalidRadius(radius_km));
        }

        let span = tracing::info_span!("solve", points = points.len(), radius_km, max_centers);
        let _guard = span.enter();

        let session = SolveSession::new(points, self.config)?;
        let report = session.search(max_centers, radius_km)?;

        let (facilities, coverage) = match &report.outcome.facilities {
            Some(set) => (
                set.coordinates(points),
                Some(session.evaluate(set, radius_km)?),
            ),
            None => (Vec::new(), None),
        };

        match report.outcome.min_centers {
            Some(k) => tracing::info!(
                min_centers = k,
                trials = report.trials.len(),
                timed_out = report.timed_out,
                "solved"
            ),
            None => tracing::info!(
                trials = report.trials.len(),
                timed_out = report.timed_out,
                "no feasible facility count within bound"
            ),
        }

        Ok(Solution {
            outcome: report.outcome,
            facilities,
            coverage,
            trials: report.trials,
            timed_out: report.timed_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMetric;
    use crate::search::{monotonicity_violations, SearchStrategy};

    fn unit_square() -> Vec<DemandPoint> {
        vec![
            DemandPoint::new(0.0, 0.0, 1.0),
            DemandPoint::new(0.0, 1.0, 1.0),
            DemandPoint::new(1.0, 0.0, 1.0),
            DemandPoint::new(1.0, 1.0, 1.0),
        ]
    }

    fn euclidean() -> Solver {
        Solver::new(SolverConfig::default().with_metric(DistanceMetric::Euclidean))
    }

    #[test]
    fn test_square_tiny_radius_needs_every_point() {
        let sol = euclidean().solve(&unit_square(), 0.01, 4).expect("valid");
        assert_eq!(sol.min_centers(), Some(4));
        assert_eq!(sol.facilities.len(), 4);
    }

    #[test]
    fn test_square_diagonal_radius_needs_one() {
        let sol = euclidean()
            .solve(&unit_square(), 2f64.sqrt(), 4)
            .expect("valid");
        assert_eq!(sol.min_centers(), Some(1));
        assert_eq!(sol.facilities, vec![(0.0, 0.0)]);
        let coverage = sol.coverage.expect("feasible");
        assert_eq!(coverage.coverage_fraction, 1.0);
    }

    #[test]
    fn test_square_on_the_globe() {
        let solver = Solver::default();
        // Side ~111 km, diagonal ~157 km at the equator.
        assert_eq!(
            solver.solve(&unit_square(), 0.01, 4).expect("valid").min_centers(),
            Some(4)
        );
        assert_eq!(
            solver.solve(&unit_square(), 160.0, 4).expect("valid").min_centers(),
            Some(1)
        );
    }

    #[test]
    fn test_single_point() {
        let points = vec![DemandPoint::new(40.7, -74.0, 2.0)];
        let sol = Solver::default().solve(&points, 0.5, 3).expect("valid");
        assert_eq!(sol.min_centers(), Some(1));
        assert_eq!(sol.facilities, vec![(40.7, -74.0)]);
        assert_eq!(
            sol.outcome.facilities,
            Some(FacilitySet::from_indices(vec![0], 1).expect("valid"))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            Solver::default().solve(&[], 1.0, 1).unwrap_err(),
            LocationError::EmptyInput
        );
    }

    #[test]
    fn test_invalid_arguments() {
        let solver = Solver::default();
        let points = unit_square();
        assert_eq!(
            solver.solve(&points, 1.0, 0).unwrap_err(),
            LocationError::InvalidCount(0)
        );
        assert_eq!(
            solver.solve(&points, 0.0, 2).unwrap_err(),
            LocationError::InvalidRadius(0.0)
        );
        let bad = vec![DemandPoint::new(0.0, 0.0, -1.0)];
        assert!(matches!(
            solver.solve(&bad, 1.0, 1).unwrap_err(),
            LocationError::InvalidWeight { index: 0, .. }
        ));
        let off_globe = vec![DemandPoint::new(0.0, 200.0, 1.0)];
        assert!(matches!(
            solver.solve(&off_globe, 1.0, 1).unwrap_err(),
            LocationError::InvalidCoordinate { index: 0, .. }
        ));
    }

    #[test]
    fn test_infeasible_is_not_an_error() {
        let sol = euclidean().solve(&unit_square(), 0.5, 2).expect("valid");
        assert!(!sol.is_feasible());
        assert!(sol.facilities.is_empty());
        assert!(sol.coverage.is_none());
        assert!(!sol.trials.is_empty());
    }

    #[test]
    fn test_unbounded_time_budget() {
        let config = SolverConfig::default()
            .with_metric(DistanceMetric::Euclidean)
            .with_time_budget(std::time::Duration::MAX);
        let sol = Solver::new(config).solve(&unit_square(), 0.01, 4).expect("valid");
        assert!(!sol.timed_out);
        assert_eq!(sol.min_centers(), Some(4));
    }

    #[test]
    fn test_session_select_more_than_points() {
        let points = unit_square();
        let session = SolveSession::new(&points, SolverConfig::default()).expect("valid");
        assert_eq!(session.select(9).expect("valid").len(), 4);
        assert!(session.distances().is_symmetric(0.0));
    }

    #[test]
    fn test_coverage_not_lower_with_more_centers() {
        let points: Vec<DemandPoint> = (0..12)
            .map(|i| {
                let lat = 40.6 + 0.02 * (i % 4) as f64;
                let lon = -74.0 + 0.03 * (i / 4) as f64;
                DemandPoint::new(lat, lon, 1.0 + (i % 3) as f64)
            })
            .collect();
        let session = SolveSession::new(&points, SolverConfig::default()).expect("valid");
        let sweep = session.sweep(2.0, 1..=12).expect("valid");
        assert!(monotonicity_violations(&sweep).is_empty());
    }

    #[test]
    fn test_strategies_through_solver() {
        let points: Vec<DemandPoint> = (0..10)
            .map(|i| DemandPoint::new(0.0, i as f64 * 2.0, 1.0))
            .collect();
        let mut results = Vec::new();
        for strategy in [SearchStrategy::Binary, SearchStrategy::Doubling, SearchStrategy::Linear] {
            let config = SolverConfig::default()
                .with_metric(DistanceMetric::Euclidean)
                .with_strategy(strategy);
            let sol = Solver::new(config).solve(&points, 2.0, 10).expect("valid");
            results.push(sol.min_centers());
        }
        assert!(results.iter().all(|r| *r == results[0]));
        assert!(results[0].is_some());
    }
}
