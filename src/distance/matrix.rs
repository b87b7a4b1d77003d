//! Dense distance matrix.

use rayon::prelude::*;

use super::DistanceMetric;
use crate::error::{LocationError, LocationResult};
use crate::models::DemandPoint;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per solve session and read-only afterwards. Rows and columns
/// are indexed by the position of the demand point in the input slice.
///
/// # Examples
///
/// ```
/// use u_location::models::DemandPoint;
/// use u_location::distance::{DistanceMatrix, DistanceMetric};
///
/// let points = vec![
///     DemandPoint::new(0.0, 0.0, 1.0),
///     DemandPoint::new(3.0, 4.0, 1.0),
///     DemandPoint::new(6.0, 8.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, DistanceMetric::Euclidean).unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the pairwise distance matrix of the given demand points.
    ///
    /// Every coordinate is validated against `metric` before any distance is
    /// computed. Each unordered pair is evaluated once and mirrored; rows of
    /// the upper triangle are computed in parallel.
    ///
    /// # Errors
    ///
    /// - [`LocationError::EmptyInput`] if `points` is empty
    /// - [`LocationError::InvalidCoordinate`] for the first invalid point
    pub fn from_points(points: &[DemandPoint], metric: DistanceMetric) -> LocationResult<Self> {
        if points.is_empty() {
            return Err(LocationError::EmptyInput);
        }
        for (i, p) in points.iter().enumerate() {
            metric.check(i, p.latitude(), p.longitude())?;
        }

        let n = points.len();
        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let from = points[i].coordinates();
                ((i + 1)..n)
                    .map(|j| metric.distance(from, points[j].coordinates()))
                    .collect()
            })
            .collect();

        let mut dm = Self::new(n);
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, d) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        Ok(dm)
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance between points `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance between points `from` and `to` (one direction only).
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of points in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns row `from` as a slice.
    pub fn row(&self, from: usize) -> &[f64] {
        let start = from * self.size;
        &self.data[start..start + self.size]
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the closest of `candidates` to `from`, with its distance.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest_of(&self, from: usize, candidates: &[usize]) -> Option<(usize, f64)> {
        let row = self.row(from);
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = row[c];
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((c, d)),
            }
        }
        best
    }
}
