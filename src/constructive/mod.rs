//! Constructive heuristics for choosing facility locations.
//!
//! - [`greedy_centers`] — Weighted greedy farthest-point selection (Gonzalez, 1985), O(k·n)

mod greedy_center;

pub use greedy_center::{greedy_centers, SelectionRule};
