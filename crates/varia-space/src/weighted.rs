//! Weighted dimension space points: points annotated with each coordinate's
//! specialization depth.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use varia_dimension::{
    ContentDimensionId, ContentDimensionSource, ContentDimensionValue,
    ContentDimensionValueSpecializationDepth,
};

use crate::errors::DimensionSpaceError;
use crate::point::{DimensionSpacePoint, DimensionSpacePointHash, digest_pairs};

/// Hash over a weight vector alone.
///
/// Two different points whose coordinates sit at identical per-dimension
/// depths share this hash; it groups points that are "equally specialized".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct WeightIdentityHash(Arc<str>);

impl WeightIdentityHash {
    /// The hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeightIdentityHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WeightIdentityHash> for String {
    fn from(hash: WeightIdentityHash) -> Self {
        hash.0.to_string()
    }
}

/// The weight vector of a dimension space point: each coordinate's
/// specialization depth, in dimension priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionSpacePointWeight {
    depths: Vec<(ContentDimensionId, ContentDimensionValueSpecializationDepth)>,
}

impl DimensionSpacePointWeight {
    /// Build a weight vector from priority-ordered depths.
    pub fn from_ordered_depths(
        depths: Vec<(ContentDimensionId, ContentDimensionValueSpecializationDepth)>,
    ) -> Self {
        Self { depths }
    }

    /// The depth at one dimension.
    pub fn get(
        &self,
        dimension_id: &ContentDimensionId,
    ) -> Option<ContentDimensionValueSpecializationDepth> {
        self.depths
            .iter()
            .find(|(id, _)| id == dimension_id)
            .map(|&(_, depth)| depth)
    }

    /// Iterate the depths in priority order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&ContentDimensionId, ContentDimensionValueSpecializationDepth)>
    {
        self.depths.iter().map(|(id, depth)| (id, *depth))
    }

    /// The plain sum of all depths.
    pub fn total(&self) -> u64 {
        self.depths
            .iter()
            .map(|&(_, depth)| u64::from(depth.value()))
            .sum()
    }

    /// Collapse the vector into a single scalar using positional notation:
    /// the depths are digits, the highest-priority dimension is the most
    /// significant digit.
    ///
    /// With `base` greater than every digit this is injective, so two weight
    /// vectors normalize equally iff they are equal.
    pub fn normalize(&self, base: u64) -> u64 {
        self.depths
            .iter()
            .fold(0, |accumulator, &(_, depth)| {
                accumulator * base + u64::from(depth.value())
            })
    }
}

/// A dimension space point carrying each coordinate's full dimension value,
/// and thereby its specialization depth at that coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedDimensionSpacePoint {
    dimension_values: Vec<(ContentDimensionId, ContentDimensionValue)>,
    dimension_space_point: DimensionSpacePoint,
    weight: DimensionSpacePointWeight,
}

impl WeightedDimensionSpacePoint {
    /// Build a weighted point from priority-ordered dimension values.
    ///
    /// Callers are responsible for the values actually belonging to their
    /// dimensions; the subspace combinator constructs them that way. Use
    /// [`WeightedDimensionSpacePoint::from_point`] for unchecked input.
    pub fn from_ordered_values(
        dimension_values: Vec<(ContentDimensionId, ContentDimensionValue)>,
    ) -> Self {
        let dimension_space_point = DimensionSpacePoint::from_coordinates(
            dimension_values
                .iter()
                .map(|(id, value)| (id.clone(), value.value.clone()))
                .collect(),
        );
        let weight = DimensionSpacePointWeight::from_ordered_depths(
            dimension_values
                .iter()
                .map(|(id, value)| (id.clone(), value.specialization_depth))
                .collect(),
        );
        Self {
            dimension_values,
            dimension_space_point,
            weight,
        }
    }

    /// Resolve a plain point's coordinates against the configured dimensions.
    ///
    /// Fails fast when a coordinate names an unconfigured dimension or a
    /// value foreign to its dimension.
    pub fn from_point(
        point: &DimensionSpacePoint,
        source: &dyn ContentDimensionSource,
    ) -> Result<Self, DimensionSpaceError> {
        let mut dimension_values = Vec::new();
        for dimension in source.content_dimensions_ordered_by_priority() {
            let value = point.coordinate(dimension.id()).ok_or_else(|| {
                DimensionSpaceError::DimensionIsNotConfigured {
                    dimension_id: dimension.id().clone(),
                }
            })?;
            let value = dimension.get_value(value).ok_or_else(|| {
                DimensionSpaceError::ValueDoesNotBelongToDimension {
                    dimension_id: dimension.id().clone(),
                    value: value.to_owned(),
                }
            })?;
            dimension_values.push((dimension.id().clone(), value.clone()));
        }
        for dimension_id in point.dimension_ids() {
            if source.get_dimension(dimension_id).is_none() {
                return Err(DimensionSpaceError::DimensionIsNotConfigured {
                    dimension_id: dimension_id.clone(),
                });
            }
        }
        Ok(Self::from_ordered_values(dimension_values))
    }

    /// The underlying dimension space point.
    pub fn dimension_space_point(&self) -> &DimensionSpacePoint {
        &self.dimension_space_point
    }

    /// The canonical hash of the underlying point.
    pub fn hash(&self) -> &DimensionSpacePointHash {
        self.dimension_space_point.hash()
    }

    /// The full dimension values, in priority order.
    pub fn dimension_values(&self) -> &[(ContentDimensionId, ContentDimensionValue)] {
        &self.dimension_values
    }

    /// The weight vector.
    pub fn weight(&self) -> &DimensionSpacePointWeight {
        &self.weight
    }

    /// Hash over the weight vector alone, grouping equally specialized points.
    pub fn identity_hash(&self) -> WeightIdentityHash {
        let depths: Vec<(String, String)> = {
            let mut sorted: Vec<_> = self
                .weight
                .iter()
                .map(|(id, depth)| (id.to_string(), depth.to_string()))
                .collect();
            sorted.sort();
            sorted
        };
        let digest = digest_pairs(depths.iter().map(|(id, depth)| (id.as_str(), depth.as_str())));
        WeightIdentityHash(Arc::from(digest.as_str()))
    }
}
