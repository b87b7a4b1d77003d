//! Search outcome and solution types.

use serde::{Deserialize, Serialize};

use super::{CoverageResult, FacilitySet};

/// Result of the minimum-cardinality search.
///
/// Both fields are `None` when no facility count up to the search bound
/// achieved full coverage. Infeasibility is a normal outcome, not an error.
///
/// # Examples
///
/// ```
/// use u_location::models::SolveOutcome;
///
/// let outcome = SolveOutcome::infeasible();
/// assert!(!outcome.is_feasible());
/// assert_eq!(outcome.min_centers, None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// Smallest facility count found to cover every point.
    pub min_centers: Option<usize>,
    /// The facilities chosen at `min_centers`.
    pub facilities: Option<FacilitySet>,
}

impl SolveOutcome {
    /// An outcome with no feasible facility count.
    pub fn infeasible() -> Self {
        Self::default()
    }

    /// A feasible outcome.
    pub fn feasible(min_centers: usize, facilities: FacilitySet) -> Self {
        Self {
            min_centers: Some(min_centers),
            facilities: Some(facilities),
        }
    }

    /// Returns `true` if a covering facility set was found.
    pub fn is_feasible(&self) -> bool {
        self.min_centers.is_some()
    }
}

/// One selector + evaluator run performed by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    /// Requested facility count.
    pub k: usize,
    /// Facilities actually selected (`min(k, N)`).
    pub facilities_used: usize,
    /// Whether every point was covered.
    pub feasible: bool,
    /// Largest nearest-facility distance.
    pub max_distance: f64,
}

/// Output of [`Solver::solve`](crate::solver::Solver::solve).
///
/// Facility coordinates are copied from the input points in selection
/// order. `coverage` describes the returned facility set and is `None` when
/// the outcome is infeasible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Minimum count and chosen indices.
    pub outcome: SolveOutcome,
    /// `(latitude, longitude)` of each chosen facility.
    pub facilities: Vec<(f64, f64)>,
    /// Coverage of the chosen facility set.
    pub coverage: Option<CoverageResult>,
    /// Every trial the search ran, in order.
    pub trials: Vec<Trial>,
    /// `true` if the time budget expired before the search finished.
    pub timed_out: bool,
}

impl Solution {
    /// Smallest feasible facility count, if any.
    pub fn min_centers(&self) -> Option<usize> {
        self.outcome.min_centers
    }

    /// Returns `true` if a covering facility set was found.
    pub fn is_feasible(&self) -> bool {
        self.outcome.is_feasible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_default_is_infeasible() {
        let outcome = SolveOutcome::default();
        assert!(!outcome.is_feasible());
        assert!(outcome.facilities.is_none());
    }

    #[test]
    fn test_outcome_feasible() {
        let set = FacilitySet::from_indices(vec![0, 2], 3).expect("valid");
        let outcome = SolveOutcome::feasible(2, set.clone());
        assert!(outcome.is_feasible());
        assert_eq!(outcome.min_centers, Some(2));
        assert_eq!(outcome.facilities, Some(set));
    }

    #[test]
    fn test_solution_accessors() {
        let sol = Solution {
            outcome: SolveOutcome::infeasible(),
            facilities: vec![],
            coverage: None,
            trials: vec![Trial {
                k: 1,
                facilities_used: 1,
                feasible: false,
                max_distance: 12.0,
            }],
            timed_out: false,
        };
        assert_eq!(sol.min_centers(), None);
        assert!(!sol.is_feasible());
    }
}
