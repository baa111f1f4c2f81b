//! A single content dimension: a forest of values with generalization edges.

use std::collections::BTreeMap;

use crate::errors::DimensionError;
use crate::identifier::ContentDimensionId;
use crate::value::{
    ContentDimensionValue, ContentDimensionValueSpecializationDepth, resolve_key_path,
};

/// A generalization edge: `specialization` falls back to `generalization`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDimensionValueVariationEdge {
    /// The more specific value.
    pub specialization: String,
    /// The more general value it falls back to.
    pub generalization: String,
}

/// One axis of content variation with a hierarchy of values.
///
/// Values are held in an arena: a vector of values plus parent/child index
/// tables. Each non-root value has exactly one generalization; every value is
/// reachable from a root. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ContentDimension {
    id: ContentDimensionId,
    values: Vec<ContentDimensionValue>,
    index_by_value: BTreeMap<String, usize>,
    generalizations: Vec<Option<usize>>,
    specializations: Vec<Vec<usize>>,
    default_value_index: usize,
    maximum_depth: ContentDimensionValueSpecializationDepth,
    configuration: serde_json::Map<String, serde_json::Value>,
}

impl ContentDimension {
    /// Build a dimension from its values and generalization edges.
    ///
    /// Values keep their declaration order; that order drives deterministic
    /// subspace enumeration downstream. Fails when the value set is empty,
    /// the default value is unknown, or the edges do not form a forest.
    pub fn new(
        id: ContentDimensionId,
        values: Vec<ContentDimensionValue>,
        edges: Vec<ContentDimensionValueVariationEdge>,
        default_value: impl AsRef<str>,
        configuration: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, DimensionError> {
        if values.is_empty() {
            return Err(DimensionError::ValuesAreMissing {
                dimension_id: id.to_string(),
            });
        }

        let mut index_by_value = BTreeMap::new();
        for (index, value) in values.iter().enumerate() {
            if index_by_value.insert(value.value.clone(), index).is_some() {
                return Err(DimensionError::VariationEdgeIsInvalid {
                    dimension_id: id.to_string(),
                    reason: format!("value \"{}\" is declared twice", value.value),
                });
            }
        }

        let default_value_index = *index_by_value.get(default_value.as_ref()).ok_or_else(|| {
            DimensionError::DefaultValueIsMissing {
                dimension_id: id.to_string(),
                default_value: default_value.as_ref().to_owned(),
            }
        })?;

        let mut generalizations = vec![None; values.len()];
        let mut specializations = vec![Vec::new(); values.len()];
        for edge in &edges {
            let specialization = *index_by_value.get(&edge.specialization).ok_or_else(|| {
                DimensionError::VariationEdgeIsInvalid {
                    dimension_id: id.to_string(),
                    reason: format!("unknown specialization value \"{}\"", edge.specialization),
                }
            })?;
            let generalization = *index_by_value.get(&edge.generalization).ok_or_else(|| {
                DimensionError::VariationEdgeIsInvalid {
                    dimension_id: id.to_string(),
                    reason: format!("unknown generalization value \"{}\"", edge.generalization),
                }
            })?;
            if generalizations[specialization].is_some() {
                return Err(DimensionError::VariationEdgeIsInvalid {
                    dimension_id: id.to_string(),
                    reason: format!(
                        "value \"{}\" has more than one generalization",
                        edge.specialization
                    ),
                });
            }
            generalizations[specialization] = Some(generalization);
            specializations[generalization].push(specialization);
        }

        // A parent chain longer than the arena means the edges loop.
        for start in 0..values.len() {
            let mut steps = 0usize;
            let mut current = start;
            while let Some(parent) = generalizations[current] {
                steps += 1;
                if steps > values.len() {
                    return Err(DimensionError::VariationEdgeIsInvalid {
                        dimension_id: id.to_string(),
                        reason: format!("value \"{}\" is part of a cycle", values[start].value),
                    });
                }
                current = parent;
            }
        }

        let maximum_depth = values
            .iter()
            .map(|value| value.specialization_depth)
            .max()
            .unwrap_or(ContentDimensionValueSpecializationDepth::ZERO);

        Ok(Self {
            id,
            values,
            index_by_value,
            generalizations,
            specializations,
            default_value_index,
            maximum_depth,
            configuration,
        })
    }

    /// The dimension's identifier.
    pub fn id(&self) -> &ContentDimensionId {
        &self.id
    }

    /// All values in declaration order.
    pub fn values(&self) -> &[ContentDimensionValue] {
        &self.values
    }

    /// Look up a value by its string representation.
    pub fn get_value(&self, value: &str) -> Option<&ContentDimensionValue> {
        self.index_by_value
            .get(value)
            .map(|&index| &self.values[index])
    }

    /// The values without a generalization, in declaration order.
    pub fn root_values(&self) -> impl Iterator<Item = &ContentDimensionValue> {
        self.values
            .iter()
            .enumerate()
            .filter(|&(index, _)| self.generalizations[index].is_none())
            .map(|(_, value)| value)
    }

    /// The dimension's default value.
    pub fn default_value(&self) -> &ContentDimensionValue {
        &self.values[self.default_value_index]
    }

    /// The direct generalization of a value, `None` for root values and for
    /// values foreign to this dimension.
    pub fn generalization(&self, value: &ContentDimensionValue) -> Option<&ContentDimensionValue> {
        let index = *self.index_by_value.get(&value.value)?;
        self.generalizations[index].map(|parent| &self.values[parent])
    }

    /// The direct specializations of a value, in declaration order.
    pub fn specializations(
        &self,
        value: &ContentDimensionValue,
    ) -> impl Iterator<Item = &ContentDimensionValue> {
        self.index_by_value
            .get(&value.value)
            .into_iter()
            .flat_map(|&index| self.specializations[index].iter())
            .map(|&child| &self.values[child])
    }

    /// Number of generalization steps from `specialization` up to
    /// `generalization`.
    ///
    /// Walks the forest upward from `specialization`; a value is at distance
    /// 0 from itself. Fails with [`DimensionError::GeneralizationIsInvalid`]
    /// when the walk reaches a root without passing `generalization`.
    pub fn calculate_specialization_depth(
        &self,
        specialization: &ContentDimensionValue,
        generalization: &ContentDimensionValue,
    ) -> Result<ContentDimensionValueSpecializationDepth, DimensionError> {
        let not_an_ancestor = || DimensionError::GeneralizationIsInvalid {
            dimension_id: self.id.to_string(),
            specialization: specialization.value.clone(),
            generalization: generalization.value.clone(),
        };

        let mut current = *self
            .index_by_value
            .get(&specialization.value)
            .ok_or_else(|| not_an_ancestor())?;
        let mut depth = ContentDimensionValueSpecializationDepth::ZERO;
        loop {
            if self.values[current].value == generalization.value {
                return Ok(depth);
            }
            match self.generalizations[current] {
                Some(parent) => {
                    current = parent;
                    depth = depth.increment();
                }
                None => return Err(not_an_ancestor()),
            }
        }
    }

    /// The largest specialization depth among this dimension's values.
    pub fn maximum_depth(&self) -> ContentDimensionValueSpecializationDepth {
        self.maximum_depth
    }

    /// Look up a dimension-level configuration value by dot-separated key path.
    pub fn get_configuration_value(&self, path: &str) -> Option<&serde_json::Value> {
        resolve_key_path(&self.configuration, path)
    }
}
