//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constructive::SelectionRule;
use crate::distance::DistanceMetric;
use crate::search::SearchStrategy;

/// Configuration for [`Solver`](crate::solver::Solver).
///
/// Defaults: haversine distances, weighted greedy selection, binary search,
/// no time budget. Every field may be omitted when deserializing.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_location::SolverConfig;
/// use u_location::distance::DistanceMetric;
/// use u_location::search::SearchStrategy;
///
/// let config = SolverConfig::default()
///     .with_metric(DistanceMetric::Vincenty)
///     .with_strategy(SearchStrategy::Doubling)
///     .with_time_budget(Duration::from_secs(5));
/// assert_eq!(config.metric, DistanceMetric::Vincenty);
/// assert_eq!(config.time_budget, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// How pairwise distances are measured.
    pub metric: DistanceMetric,
    /// Greedy seeding and scoring rule.
    pub rule: SelectionRule,
    /// How facility counts are tried.
    pub strategy: SearchStrategy,
    /// Wall-clock budget for the search; `None` means unlimited.
    pub time_budget: Option<Duration>,
}

impl SolverConfig {
    /// Sets the distance metric.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the greedy selection rule.
    pub fn with_rule(mut self, rule: SelectionRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the search time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}
