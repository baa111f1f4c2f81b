//! Hash-indexed sets of dimension space points.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::point::{DimensionSpacePoint, DimensionSpacePointHash};

/// An ordered set of dimension space points, indexed by canonical hash.
///
/// Iteration order is hash order, which makes every set operation
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DimensionSpacePoint>", into = "Vec<DimensionSpacePoint>")]
pub struct DimensionSpacePointSet {
    points: BTreeMap<DimensionSpacePointHash, DimensionSpacePoint>,
}

impl DimensionSpacePointSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from points; duplicates collapse.
    pub fn from_points(points: impl IntoIterator<Item = DimensionSpacePoint>) -> Self {
        points.into_iter().collect()
    }

    /// Insert a point. Returns whether the set changed.
    pub fn insert(&mut self, point: DimensionSpacePoint) -> bool {
        self.points.insert(point.hash().clone(), point).is_none()
    }

    /// Whether the set contains the given point.
    pub fn contains(&self, point: &DimensionSpacePoint) -> bool {
        self.points.contains_key(point.hash())
    }

    /// Whether the set contains a point with the given hash.
    pub fn contains_hash(&self, hash: &DimensionSpacePointHash) -> bool {
        self.points.contains_key(hash)
    }

    /// Look up a point by hash.
    pub fn get(&self, hash: &DimensionSpacePointHash) -> Option<&DimensionSpacePoint> {
        self.points.get(hash)
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate the points in hash order.
    pub fn iter(&self) -> impl Iterator<Item = &DimensionSpacePoint> {
        self.points.values()
    }

    /// Iterate the hashes in order.
    pub fn hashes(&self) -> impl Iterator<Item = &DimensionSpacePointHash> {
        self.points.keys()
    }

    /// Points present in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        self.points
            .values()
            .filter(|point| other.contains(point))
            .cloned()
            .collect()
    }

    /// Points present in `self` but not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.points
            .values()
            .filter(|point| !other.contains(point))
            .cloned()
            .collect()
    }

    /// Points present in either set.
    pub fn union(&self, other: &Self) -> Self {
        self.points
            .values()
            .chain(other.points.values())
            .cloned()
            .collect()
    }
}

impl FromIterator<DimensionSpacePoint> for DimensionSpacePointSet {
    fn from_iter<I: IntoIterator<Item = DimensionSpacePoint>>(iter: I) -> Self {
        let mut set = Self::default();
        for point in iter {
            let _ = set.insert(point);
        }
        set
    }
}

impl<'a> IntoIterator for &'a DimensionSpacePointSet {
    type Item = &'a DimensionSpacePoint;
    type IntoIter = std::collections::btree_map::Values<'a, DimensionSpacePointHash, DimensionSpacePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.values()
    }
}

impl IntoIterator for DimensionSpacePointSet {
    type Item = DimensionSpacePoint;
    type IntoIter =
        std::collections::btree_map::IntoValues<DimensionSpacePointHash, DimensionSpacePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_values()
    }
}

impl From<Vec<DimensionSpacePoint>> for DimensionSpacePointSet {
    fn from(points: Vec<DimensionSpacePoint>) -> Self {
        points.into_iter().collect()
    }
}

impl From<DimensionSpacePointSet> for Vec<DimensionSpacePoint> {
    fn from(set: DimensionSpacePointSet) -> Self {
        set.points.into_values().collect()
    }
}
