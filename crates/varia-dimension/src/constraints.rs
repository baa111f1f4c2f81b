//! Cross-dimension combination constraints.
//!
//! A dimension value may restrict which values of *other* dimensions it can
//! legally be combined with. Restrictions are expressed as a wildcard default
//! plus per-value overrides, collected per restricted dimension.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identifier::ContentDimensionId;

/// Combination constraints a dimension value imposes on one other dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDimensionConstraints {
    /// Whether values without an explicit override are allowed.
    pub wildcard_allowed: bool,
    /// Per-value overrides of the wildcard.
    pub value_overrides: BTreeMap<String, bool>,
}

impl ContentDimensionConstraints {
    /// Constraints that allow every combination.
    pub fn allow_all() -> Self {
        Self {
            wildcard_allowed: true,
            value_overrides: BTreeMap::new(),
        }
    }

    /// Whether a combination with the given value of the other dimension is allowed.
    pub fn allows(&self, value: &str) -> bool {
        self.value_overrides
            .get(value)
            .copied()
            .unwrap_or(self.wildcard_allowed)
    }
}

/// All combination constraints of one dimension value, keyed by the
/// restricted dimension.
///
/// Dimensions without an entry are unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDimensionConstraintSet(
    BTreeMap<ContentDimensionId, ContentDimensionConstraints>,
);

impl ContentDimensionConstraintSet {
    /// An empty, fully permissive constraint set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a constraint set from per-dimension constraints.
    pub fn from_constraints(
        constraints: impl IntoIterator<Item = (ContentDimensionId, ContentDimensionConstraints)>,
    ) -> Self {
        Self(constraints.into_iter().collect())
    }

    /// The constraints imposed on the given dimension, if any.
    pub fn get(&self, dimension_id: &ContentDimensionId) -> Option<&ContentDimensionConstraints> {
        self.0.get(dimension_id)
    }

    /// Whether a combination with the given value of the given dimension is
    /// allowed. Unconstrained dimensions allow everything.
    pub fn allows_combination_with(&self, dimension_id: &ContentDimensionId, value: &str) -> bool {
        self.0
            .get(dimension_id)
            .is_none_or(|constraints| constraints.allows(value))
    }

    /// Whether the set carries no constraints at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
