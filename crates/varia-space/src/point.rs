//! Dimension space points: coordinate tuples across all dimensions.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use varia_dimension::{ContentDimensionId, DimensionError};

/// Canonical hash of a dimension space point.
///
/// A stable hex string over the dimension-sorted coordinates; two points with
/// equal coordinates share the hash regardless of construction order. Used as
/// the map key for points everywhere.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DimensionSpacePointHash(Arc<str>);

impl DimensionSpacePointHash {
    /// The hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DimensionSpacePointHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DimensionSpacePointHash {
    fn from(hash: String) -> Self {
        Self(Arc::from(hash.as_str()))
    }
}

impl From<DimensionSpacePointHash> for String {
    fn from(hash: DimensionSpacePointHash) -> Self {
        hash.0.to_string()
    }
}

/// Hash a sequence of key/value pairs into a 32-char hex digest.
///
/// Keys must already be in canonical (sorted) order.
pub(crate) fn digest_pairs<'a>(
    pairs: impl Iterator<Item = (&'a str, &'a str)>,
) -> DimensionSpacePointHash {
    let mut hasher = Sha256::new();
    for (key, value) in pairs {
        hasher.update(key.as_bytes());
        hasher.update([0x1f]);
        hasher.update(value.as_bytes());
        hasher.update([0x1e]);
    }
    let digest = hasher.finalize();
    let hex: String = digest[..16].iter().map(|byte| format!("{byte:02x}")).collect();
    DimensionSpacePointHash(Arc::from(hex.as_str()))
}

/// One coordinate tuple across all dimensions: a legal combination of
/// dimension values, e.g. `{market: "eu", language: "de"}`.
///
/// Immutable value type with structural equality and a canonical
/// [`hash`](DimensionSpacePoint::hash). Serialization round-trips through the
/// coordinate map, so insertion order never matters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<ContentDimensionId, String>",
    into = "BTreeMap<ContentDimensionId, String>"
)]
pub struct DimensionSpacePoint {
    coordinates: BTreeMap<ContentDimensionId, String>,
    hash: DimensionSpacePointHash,
}

impl DimensionSpacePoint {
    /// Build a point from its coordinates.
    pub fn from_coordinates(coordinates: BTreeMap<ContentDimensionId, String>) -> Self {
        let hash = digest_pairs(
            coordinates
                .iter()
                .map(|(id, value)| (id.as_str(), value.as_str())),
        );
        Self { coordinates, hash }
    }

    /// Build a point from raw string pairs, validating dimension identifiers.
    pub fn from_raw<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, DimensionError> {
        let mut coordinates = BTreeMap::new();
        for (id, value) in pairs {
            let _ = coordinates.insert(ContentDimensionId::new(id)?, value.to_owned());
        }
        Ok(Self::from_coordinates(coordinates))
    }

    /// The point of the empty dimension set.
    pub fn empty() -> Self {
        Self::from_coordinates(BTreeMap::new())
    }

    /// The canonical hash.
    pub fn hash(&self) -> &DimensionSpacePointHash {
        &self.hash
    }

    /// The value of one coordinate.
    pub fn coordinate(&self, dimension_id: &ContentDimensionId) -> Option<&str> {
        self.coordinates.get(dimension_id).map(String::as_str)
    }

    /// All coordinates, sorted by dimension identifier.
    pub fn coordinates(&self) -> &BTreeMap<ContentDimensionId, String> {
        &self.coordinates
    }

    /// The dimensions this point has coordinates in.
    pub fn dimension_ids(&self) -> impl Iterator<Item = &ContentDimensionId> {
        self.coordinates.keys()
    }

    /// Whether the point has no coordinates (empty dimension set).
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// A copy of this point with one coordinate replaced.
    pub fn vary(&self, dimension_id: &ContentDimensionId, value: impl Into<String>) -> Self {
        let mut coordinates = self.coordinates.clone();
        let _ = coordinates.insert(dimension_id.clone(), value.into());
        Self::from_coordinates(coordinates)
    }
}

impl fmt::Display for DimensionSpacePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (id, value)) in self.coordinates.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl From<BTreeMap<ContentDimensionId, String>> for DimensionSpacePoint {
    fn from(coordinates: BTreeMap<ContentDimensionId, String>) -> Self {
        Self::from_coordinates(coordinates)
    }
}

impl From<DimensionSpacePoint> for BTreeMap<ContentDimensionId, String> {
    fn from(point: DimensionSpacePoint) -> Self {
        point.coordinates
    }
}

/// A dimension space point in its role as the origin of content: the point a
/// node variant's content actually lives in, as opposed to the points it is
/// merely visible in.
///
/// Same coordinates and hash semantics as [`DimensionSpacePoint`]; the
/// distinct type keeps occupation and coverage from being mixed up.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginDimensionSpacePoint(DimensionSpacePoint);

impl OriginDimensionSpacePoint {
    /// The underlying dimension space point.
    pub fn as_point(&self) -> &DimensionSpacePoint {
        &self.0
    }

    /// Unwrap into the underlying dimension space point.
    pub fn into_point(self) -> DimensionSpacePoint {
        self.0
    }

    /// The canonical hash (shared with the plain point).
    pub fn hash(&self) -> &DimensionSpacePointHash {
        self.0.hash()
    }
}

impl From<DimensionSpacePoint> for OriginDimensionSpacePoint {
    fn from(point: DimensionSpacePoint) -> Self {
        Self(point)
    }
}

impl fmt::Display for OriginDimensionSpacePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
