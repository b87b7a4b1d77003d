//! Search over the facility count.
//!
//! - [`MinCardinalitySearch`] — Smallest `k` whose greedy selection covers every point
//! - [`coverage_sweep`] — Coverage for every `k` in a range, with a monotonicity audit

mod min_cardinality;
mod sweep;

pub use min_cardinality::{MinCardinalitySearch, SearchReport, SearchStrategy};
pub use sweep::{coverage_sweep, monotonicity_violations, MonotonicityViolation, SweepPoint};
