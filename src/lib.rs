//! # u-location
//!
//! Facility location library: places the fewest hubs such that every
//! weighted demand point lies within a service radius of some hub, using
//! weighted greedy farthest-point selection inside a search over the hub
//! count.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (DemandPoint, FacilitySet, CoverageResult, SolveOutcome)
//! - [`distance`] — Geodesic distances and the per-session distance matrix
//! - [`constructive`] — Greedy center selection
//! - [`evaluation`] — Coverage metrics and feasibility
//! - [`search`] — Minimum facility count search and coverage sweep
//! - [`weighting`] — Density adapters producing weighted demand points
//! - [`solver`] — Solve sessions and the top-level entry point
//!
//! ## Example
//!
//! ```
//! use u_location::{Solver, SolverConfig};
//! use u_location::models::DemandPoint;
//!
//! let points = vec![
//!     DemandPoint::new(40.7580, -73.9855, 2.0),
//!     DemandPoint::new(40.7074, -74.0113, 1.0),
//!     DemandPoint::new(40.6782, -73.9442, 1.5),
//! ];
//! let solution = Solver::new(SolverConfig::default())
//!     .solve(&points, 10.0, 3)
//!     .unwrap();
//! assert_eq!(solution.min_centers(), Some(1));
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod models;
pub mod search;
pub mod solver;
pub mod weighting;

pub use config::SolverConfig;
pub use error::{LocationError, LocationResult};
pub use solver::{SolveSession, Solver};
