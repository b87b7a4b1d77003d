//! Facility set type.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::DemandPoint;
use crate::error::{LocationError, LocationResult};

/// An ordered set of demand point indices chosen as facility locations.
///
/// Indices are distinct. Order is selection order: the first entry is the
/// seed of a greedy selection.
///
/// # Examples
///
/// ```
/// use u_location::models::FacilitySet;
///
/// let set = FacilitySet::from_indices(vec![2, 0], 3).unwrap();
/// assert_eq!(set.indices(), &[2, 0]);
/// assert!(set.contains(0));
/// assert!(FacilitySet::from_indices(vec![1, 1], 3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct FacilitySet {
    indices: Vec<usize>,
}

impl FacilitySet {
    /// Creates an empty facility set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a facility set over `size` points from explicit indices.
    ///
    /// # Errors
    ///
    /// - [`LocationError::FacilityOutOfRange`] for an index `>= size`
    /// - [`LocationError::DuplicateFacility`] for a repeated index
    pub fn from_indices(indices: Vec<usize>, size: usize) -> LocationResult<Self> {
        if let Some(&index) = indices.iter().find(|&&i| i >= size) {
            return Err(LocationError::FacilityOutOfRange { index, size });
        }
        Self::try_from(indices)
    }

    /// Appends a facility. Callers guarantee the index is new.
    pub(crate) fn push(&mut self, index: usize) {
        debug_assert!(!self.indices.contains(&index), "duplicate facility {index}");
        self.indices.push(index);
    }

    /// Facility indices in selection order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of facilities.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if no facility has been selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns `true` if point `index` is a facility.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Copies the `(latitude, longitude)` of each facility from `points`.
    pub fn coordinates(&self, points: &[DemandPoint]) -> Vec<(f64, f64)> {
        self.indices.iter().map(|&i| points[i].coordinates()).collect()
    }
}

impl TryFrom<Vec<usize>> for FacilitySet {
    type Error = LocationError;

    /// Accepts distinct indices; the range is checked against a matrix on
    /// evaluation.
    fn try_from(indices: Vec<usize>) -> LocationResult<Self> {
        let mut seen = HashSet::with_capacity(indices.len());
        if let Some(&index) = indices.iter().find(|&&i| !seen.insert(i)) {
            return Err(LocationError::DuplicateFacility(index));
        }
        Ok(Self { indices })
    }
}

impl From<FacilitySet> for Vec<usize> {
    fn from(set: FacilitySet) -> Self {
        set.indices
    }
}
