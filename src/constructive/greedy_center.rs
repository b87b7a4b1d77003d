//! Weighted greedy farthest-point center selection.
//!
//! # Algorithm
//!
//! 1. Seed with the heaviest demand point (lowest index on ties).
//! 2. Repeatedly add the remaining point that maximizes
//!    `weight × distance to its nearest chosen facility`, again breaking
//!    ties by lowest index.
//!
//! Selection uses a boolean mask plus a nearest-facility distance vector that
//! is tightened after every pick, so points with identical coordinates are
//! still handled as distinct candidates.
//!
//! # Complexity
//!
//! O(k·n) distance lookups for `k` facilities over `n` points.
//!
//! # Reference
//!
//! Gonzalez, T.F. (1985). "Clustering to minimize the maximum intercluster
//! distance", *Theoretical Computer Science* 38, 293-306.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{LocationError, LocationResult};
use crate::models::{validate_weights, FacilitySet};

/// Seeding and scoring rule for greedy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// Seed at the heaviest point; score candidates by weighted distance.
    #[default]
    Weighted,
    /// Seed at point 0; score candidates by plain distance, ignoring weights.
    Farthest,
}

/// Selects `min(k, N)` facilities by greedy farthest-point selection.
///
/// Deterministic: identical inputs always yield an identical facility set.
/// The per-candidate scan runs in parallel and is reduced by (benefit,
/// lowest index).
///
/// # Arguments
///
/// * `k` — Requested facility count
/// * `distances` — Session distance matrix
/// * `weights` — One weight per point
/// * `rule` — Seeding and scoring rule
///
/// # Errors
///
/// - [`LocationError::InvalidCount`] if `k == 0`
/// - [`LocationError::SizeMismatch`] if `weights.len()` differs from the
///   matrix size
/// - [`LocationError::InvalidWeight`] for a negative or non-finite weight
///
/// # Examples
///
/// ```
/// use u_location::models::DemandPoint;
/// use u_location::distance::{DistanceMatrix, DistanceMetric};
/// use u_location::constructive::{greedy_centers, SelectionRule};
///
/// let points = vec![
///     DemandPoint::new(0.0, 0.0, 1.0),
///     DemandPoint::new(0.0, 1.0, 5.0),
///     DemandPoint::new(0.0, 9.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, DistanceMetric::Euclidean).unwrap();
/// let weights: Vec<f64> = points.iter().map(|p| p.weight()).collect();
///
/// let set = greedy_centers(2, &dm, &weights, SelectionRule::Weighted).unwrap();
/// // Seed is the heaviest point, then the point farthest from it.
/// assert_eq!(set.indices(), &[1, 2]);
/// ```
pub fn greedy_centers(
    k: usize,
    distances: &DistanceMatrix,
    weights: &[f64],
    rule: SelectionRule,
) -> LocationResult<FacilitySet> {
    if k < 1 {
        return Err(LocationError::InvalidCount(k));
    }
    let n = distances.size();
    if weights.len() != n {
        return Err(LocationError::SizeMismatch {
            expected: n,
            actual: weights.len(),
        });
    }
    validate_weights(weights)?;

    let mut facilities = FacilitySet::new();
    if n == 0 {
        return Ok(facilities);
    }

    let seed = match rule {
        SelectionRule::Weighted => heaviest(weights),
        SelectionRule::Farthest => 0,
    };

    let mut selected = vec![false; n];
    selected[seed] = true;
    facilities.push(seed);
    let mut nearest = distances.row(seed).to_vec();

    let target = k.min(n);
    while facilities.len() < target {
        let best = (0..n)
            .into_par_iter()
            .filter(|&i| !selected[i])
            .map(|i| {
                let benefit = match rule {
                    SelectionRule::Weighted => nearest[i] * weights[i],
                    SelectionRule::Farthest => nearest[i],
                };
                (i, benefit)
            })
            .reduce_with(prefer);

        let Some((next, _)) = best else {
            break;
        };
        selected[next] = true;
        facilities.push(next);

        nearest
            .par_iter_mut()
            .zip(distances.row(next).par_iter())
            .for_each(|(d, &to_next)| {
                if to_next < *d {
                    *d = to_next;
                }
            });
    }

    Ok(facilities)
}

/// Index of the largest weight, lowest index on ties.
fn heaviest(weights: &[f64]) -> usize {
    let mut best = 0;
    for (i, &w) in weights.iter().enumerate().skip(1) {
        if w > weights[best] {
            best = i;
        }
    }
    best
}

/// Higher benefit wins; equal benefit goes to the lower index.
///
/// `total_cmp` keeps this a total order even for NaN benefits (an overflowed
/// distance times a zero weight), so the parallel reduction is deterministic.
fn prefer(a: (usize, f64), b: (usize, f64)) -> (usize, f64) {
    match b.1.total_cmp(&a.1) {
        Ordering::Greater => b,
        Ordering::Equal if b.0 < a.0 => b,
        _ => a,
    }
}
