//! Domain model types for facility location.
//!
//! Weighted demand points, the facility sets chosen among them, coverage
//! metrics for a facility set, and the outcome of the cardinality search.

mod coverage;
mod demand;
mod facility;
mod solution;

pub use coverage::CoverageResult;
pub use demand::{validate_weights, DemandPoint};
pub use facility::FacilitySet;
pub use solution::{Solution, SolveOutcome, Trial};
