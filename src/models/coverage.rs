//! Coverage metrics.

use serde::{Deserialize, Serialize};

/// Coverage of all demand points by a facility set at a given radius.
///
/// Derived read-only from a facility set; recomputed on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// Radius the points were tested against.
    pub radius: f64,
    /// Largest nearest-facility distance over all points.
    pub max_distance: f64,
    /// Mean nearest-facility distance.
    pub avg_distance: f64,
    /// Points whose nearest facility lies within `radius` (inclusive).
    pub covered_count: usize,
    /// Number of demand points.
    pub total_count: usize,
    /// `covered_count / total_count`; 1.0 when there are no points.
    pub coverage_fraction: f64,
    /// For each point, the index of its nearest facility.
    pub assignments: Vec<usize>,
}

impl CoverageResult {
    /// Returns `true` if every point is within the radius.
    pub fn is_feasible(&self) -> bool {
        self.max_distance <= self.radius
    }

    /// Number of points outside the radius.
    pub fn uncovered_count(&self) -> usize {
        self.total_count - self.covered_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feasibility_is_inclusive() {
        let c = CoverageResult {
            radius: 5.0,
            max_distance: 5.0,
            avg_distance: 2.5,
            covered_count: 2,
            total_count: 2,
            coverage_fraction: 1.0,
            assignments: vec![0, 0],
        };
        assert!(c.is_feasible());
        assert_eq!(c.uncovered_count(), 0);
    }
}
