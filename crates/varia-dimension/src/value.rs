//! Content dimension values and their specialization depths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constraints::ContentDimensionConstraintSet;
use crate::errors::DimensionError;

/// Distance of a dimension value from its root along generalization edges.
///
/// Root values have depth 0.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct ContentDimensionValueSpecializationDepth(u32);

impl ContentDimensionValueSpecializationDepth {
    /// The depth of a root value.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw depth.
    pub const fn new(depth: u32) -> Self {
        Self(depth)
    }

    /// The raw depth.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The depth one specialization step further down.
    pub const fn increment(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ContentDimensionValueSpecializationDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for ContentDimensionValueSpecializationDepth {
    type Error = DimensionError;

    fn try_from(depth: i64) -> Result<Self, Self::Error> {
        u32::try_from(depth)
            .map(Self)
            .map_err(|_| DimensionError::SpecializationDepthIsInvalid { depth })
    }
}

impl From<ContentDimensionValueSpecializationDepth> for i64 {
    fn from(depth: ContentDimensionValueSpecializationDepth) -> Self {
        Self::from(depth.0)
    }
}

/// One value of a content dimension, e.g. `"en_US"` of dimension `"language"`.
///
/// Carries its distance from the dimension root, the combination constraints
/// it imposes on other dimensions, and arbitrary configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDimensionValue {
    /// The value itself. Non-empty.
    pub value: String,
    /// Distance from the dimension root (0 for root values).
    pub specialization_depth: ContentDimensionValueSpecializationDepth,
    /// Combination constraints imposed on other dimensions.
    #[serde(default, skip_serializing_if = "ContentDimensionConstraintSet::is_empty")]
    pub constraints: ContentDimensionConstraintSet,
    /// Arbitrary configuration attached to the value.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub configuration: serde_json::Map<String, serde_json::Value>,
}

impl ContentDimensionValue {
    /// Create a value with no constraints and no configuration.
    pub fn new(
        value: impl Into<String>,
        specialization_depth: ContentDimensionValueSpecializationDepth,
    ) -> Result<Self, DimensionError> {
        Self::with_constraints_and_configuration(
            value,
            specialization_depth,
            ContentDimensionConstraintSet::empty(),
            serde_json::Map::new(),
        )
    }

    /// Create a fully specified value.
    pub fn with_constraints_and_configuration(
        value: impl Into<String>,
        specialization_depth: ContentDimensionValueSpecializationDepth,
        constraints: ContentDimensionConstraintSet,
        configuration: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, DimensionError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DimensionError::ValueIsInvalid);
        }
        Ok(Self {
            value,
            specialization_depth,
            constraints,
            configuration,
        })
    }

    /// Look up a configuration value by dot-separated key path.
    pub fn get_configuration_value(&self, path: &str) -> Option<&serde_json::Value> {
        resolve_key_path(&self.configuration, path)
    }
}

impl fmt::Display for ContentDimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Walk a dot-separated key path through a JSON object tree.
pub(crate) fn resolve_key_path<'a>(
    map: &'a serde_json::Map<String, serde_json::Value>,
    path: &str,
) -> Option<&'a serde_json::Value> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
