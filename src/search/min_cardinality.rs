//! Minimum facility count search.
//!
//! # Algorithm
//!
//! Finds the smallest `k` in `[1, max_centers]` for which
//! [`greedy_centers`] yields a facility set covering every point. The
//! default binary search assumes feasibility is monotone in `k`. The greedy
//! heuristic does not guarantee this, so the result is an approximation; the
//! [`Doubling`](SearchStrategy::Doubling) and
//! [`Linear`](SearchStrategy::Linear) strategies trade trials for a tighter
//! answer, and [`coverage_sweep`](super::coverage_sweep) can audit an
//! instance.
//!
//! # Complexity
//!
//! Binary: O(log m) trials; Doubling: O(log m) trials plus a linear window;
//! Linear: O(m) trials, where `m = min(max_centers, N)`.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constructive::{greedy_centers, SelectionRule};
use crate::distance::DistanceMatrix;
use crate::error::{LocationError, LocationResult};
use crate::evaluation::CoverageEvaluator;
use crate::models::{FacilitySet, SolveOutcome, Trial};

/// How candidate facility counts are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Integer binary search over `[1, max_centers]`.
    #[default]
    Binary,
    /// Try `k = 1, 2, 4, ...` until feasible, then scan upward from the
    /// last infeasible trial to confirm the boundary.
    Doubling,
    /// Try every `k` from 1, stopping at the first feasible one.
    Linear,
}

/// Outcome of a search together with the trials that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// Smallest feasible count found, if any.
    pub outcome: SolveOutcome,
    /// Every trial in the order it ran.
    pub trials: Vec<Trial>,
    /// `true` if the time budget stopped the search early.
    pub timed_out: bool,
}

/// Searches for the smallest facility count with full coverage.
///
/// # Examples
///
/// ```
/// use u_location::models::DemandPoint;
/// use u_location::distance::{DistanceMatrix, DistanceMetric};
/// use u_location::search::{MinCardinalitySearch, SearchStrategy};
///
/// let points = vec![
///     DemandPoint::new(0.0, 0.0, 1.0),
///     DemandPoint::new(0.0, 1.0, 1.0),
///     DemandPoint::new(0.0, 10.0, 1.0),
///     DemandPoint::new(0.0, 11.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, DistanceMetric::Euclidean).unwrap();
/// let weights = vec![1.0; 4];
///
/// let report = MinCardinalitySearch::new(&dm, &weights)
///     .with_strategy(SearchStrategy::Binary)
///     .run(4, 1.0)
///     .unwrap();
/// assert_eq!(report.outcome.min_centers, Some(2));
/// ```
pub struct MinCardinalitySearch<'a> {
    distances: &'a DistanceMatrix,
    weights: &'a [f64],
    rule: SelectionRule,
    strategy: SearchStrategy,
    time_budget: Option<Duration>,
}

impl<'a> MinCardinalitySearch<'a> {
    /// Creates a binary search with the weighted selection rule and no
    /// time budget.
    pub fn new(distances: &'a DistanceMatrix, weights: &'a [f64]) -> Self {
        Self {
            distances,
            weights,
            rule: SelectionRule::default(),
            strategy: SearchStrategy::default(),
            time_budget: None,
        }
    }

    /// Sets the greedy selection rule.
    pub fn with_rule(mut self, rule: SelectionRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the probing strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets a wall-clock budget, checked before every trial.
    ///
    /// When it expires the search stops and the best outcome found so far
    /// is returned with `timed_out` set.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Runs the search.
    ///
    /// The upper bound is clamped to the number of points, since every
    /// `k >= N` selects all of them.
    ///
    /// # Errors
    ///
    /// - [`LocationError::InvalidCount`] if `max_centers == 0`
    /// - [`LocationError::InvalidRadius`] if `radius` is negative or not finite
    /// - [`LocationError::EmptyInput`] if the matrix has no points
    /// - any error from [`greedy_centers`] (weight problems)
    pub fn run(&self, max_centers: usize, radius: f64) -> LocationResult<SearchReport> {
        if max_centers < 1 {
            return Err(LocationError::InvalidCount(max_centers));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(LocationError::InvalidRadius(radius));
        }
        let n = self.distances.size();
        if n == 0 {
            return Err(LocationError::EmptyInput);
        }

        let bound = max_centers.min(n);
        if bound < max_centers {
            tracing::debug!(max_centers, points = n, "clamping search bound to point count");
        }

        let mut run = Run {
            search: self,
            evaluator: CoverageEvaluator::new(self.distances),
            radius,
            // A budget too large to represent as an instant means no deadline.
            deadline: self
                .time_budget
                .and_then(|b| Instant::now().checked_add(b)),
            trials: Vec::new(),
            best: None,
            timed_out: false,
        };

        match self.strategy {
            SearchStrategy::Binary => run.binary(bound)?,
            SearchStrategy::Doubling => run.doubling(bound)?,
            SearchStrategy::Linear => run.linear(bound)?,
        }

        if run.timed_out {
            tracing::warn!(
                trials = run.trials.len(),
                best = ?run.best.as_ref().map(|(k, _)| *k),
                "time budget expired, returning best-so-far outcome"
            );
        }

        let outcome = match run.best {
            Some((k, facilities)) => SolveOutcome::feasible(k, facilities),
            None => SolveOutcome::infeasible(),
        };
        tracing::debug!(
            strategy = ?self.strategy,
            min_centers = ?outcome.min_centers,
            trials = run.trials.len(),
            "search finished"
        );

        Ok(SearchReport {
            outcome,
            trials: run.trials,
            timed_out: run.timed_out,
        })
    }
}

/// Mutable state of one search run.
struct Run<'s, 'a> {
    search: &'s MinCardinalitySearch<'a>,
    evaluator: CoverageEvaluator<'a>,
    radius: f64,
    deadline: Option<Instant>,
    trials: Vec<Trial>,
    best: Option<(usize, FacilitySet)>,
    timed_out: bool,
}

impl Run<'_, '_> {
    /// Selects and evaluates `k` facilities.
    ///
    /// Returns `None` once the deadline has passed.
    fn attempt(&mut self, k: usize) -> LocationResult<Option<bool>> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
                return Ok(None);
            }
        }

        let facilities = greedy_centers(k, self.search.distances, self.search.weights, self.search.rule)?;
        let coverage = self.evaluator.evaluate(&facilities, self.radius)?;
        let feasible = coverage.is_feasible();
        tracing::debug!(k, feasible, max_distance = coverage.max_distance, "trial");

        self.trials.push(Trial {
            k,
            facilities_used: facilities.len(),
            feasible,
            max_distance: coverage.max_distance,
        });
        if feasible && self.best.as_ref().map_or(true, |(best_k, _)| k < *best_k) {
            self.best = Some((k, facilities));
        }
        Ok(Some(feasible))
    }

    fn binary(&mut self, bound: usize) -> LocationResult<()> {
        let (mut left, mut right) = (1, bound);
        while left <= right {
            let mid = left + (right - left) / 2;
            match self.attempt(mid)? {
                None => break,
                Some(true) => right = mid - 1,
                Some(false) => left = mid + 1,
            }
        }
        Ok(())
    }

    fn doubling(&mut self, bound: usize) -> LocationResult<()> {
        let mut last_infeasible = 0;
        let mut k = 1;
        loop {
            match self.attempt(k)? {
                None => return Ok(()),
                Some(true) => break,
                Some(false) => {
                    if k == bound {
                        return Ok(());
                    }
                    last_infeasible = k;
                    k = (k * 2).min(bound);
                }
            }
        }
        for candidate in (last_infeasible + 1)..k {
            match self.attempt(candidate)? {
                Some(false) => {}
                None | Some(true) => break,
            }
        }
        Ok(())
    }

    fn linear(&mut self, bound: usize) -> LocationResult<()> {
        for k in 1..=bound {
            match self.attempt(k)? {
                Some(false) => {}
                None | Some(true) => break,
            }
        }
        Ok(())
    }
}
