//! Coverage evaluation of facility sets.

mod coverage;

pub use coverage::CoverageEvaluator;
