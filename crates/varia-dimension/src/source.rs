//! Dimension sources: where the configured set of dimensions comes from.
//!
//! The engine never hardcodes dimensions; it consumes a
//! [`ContentDimensionSource`]. The standard implementation parses the nested
//! per-dimension configuration format:
//!
//! ```json
//! {
//!     "market": {
//!         "values": {
//!             "eu": {
//!                 "constraints": { "language": { "*": false, "en": true } },
//!                 "specializations": {
//!                     "de": {},
//!                     "fr": {}
//!                 }
//!             }
//!         },
//!         "defaultValue": "eu"
//!     }
//! }
//! ```
//!
//! Dimension and value declaration order is preserved; the dimension order
//! is the priority order used for all tie-breaks downstream.

use std::collections::BTreeMap;
use std::path::Path;

use crate::constraints::{ContentDimensionConstraintSet, ContentDimensionConstraints};
use crate::dimension::{ContentDimension, ContentDimensionValueVariationEdge};
use crate::errors::ConfigurationError;
use crate::identifier::ContentDimensionId;
use crate::value::{ContentDimensionValue, ContentDimensionValueSpecializationDepth};

/// Provider of all configured content dimensions.
///
/// `content_dimensions_ordered_by_priority` is stable: the dimension at
/// index 0 has the highest priority.
pub trait ContentDimensionSource: Send + Sync {
    /// Look up a single dimension.
    fn get_dimension(&self, id: &ContentDimensionId) -> Option<&ContentDimension>;

    /// All dimensions in priority order.
    fn content_dimensions_ordered_by_priority(&self) -> &[ContentDimension];
}

/// A [`ContentDimensionSource`] backed by parsed configuration.
#[derive(Debug)]
pub struct ConfigurationBasedContentDimensionSource {
    dimensions: Vec<ContentDimension>,
    index_by_id: BTreeMap<ContentDimensionId, usize>,
}

/// Value-level keys that are structure, not configuration.
const VALUE_STRUCTURE_KEYS: [&str; 2] = ["constraints", "specializations"];
/// Dimension-level keys that are structure, not configuration.
const DIMENSION_STRUCTURE_KEYS: [&str; 2] = ["values", "defaultValue"];

impl ConfigurationBasedContentDimensionSource {
    /// Parse a configuration tree into dimensions.
    ///
    /// An empty configuration yields zero dimensions (the engine then
    /// operates on the singular empty dimension space point).
    pub fn from_configuration(
        configuration: &serde_json::Value,
    ) -> Result<Self, ConfigurationError> {
        let empty = serde_json::Map::new();
        let dimensions_config = match configuration {
            serde_json::Value::Null => &empty,
            serde_json::Value::Object(map) => map,
            other => {
                return Err(ConfigurationError::Malformed {
                    dimension_id: String::new(),
                    reason: format!("expected an object at the top level, got {other}"),
                });
            }
        };

        let mut dimensions = Vec::with_capacity(dimensions_config.len());
        let mut index_by_id = BTreeMap::new();
        for (raw_id, dimension_config) in dimensions_config {
            let id = ContentDimensionId::new(raw_id).map_err(ConfigurationError::Dimension)?;
            let dimension = parse_dimension(id.clone(), raw_id, dimension_config)?;
            let _ = index_by_id.insert(id, dimensions.len());
            dimensions.push(dimension);
        }

        tracing::debug!(
            dimension_count = dimensions.len(),
            "content dimension configuration parsed"
        );

        Ok(Self {
            dimensions,
            index_by_id,
        })
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let configuration: serde_json::Value = serde_json::from_str(&raw)?;
        let source = Self::from_configuration(&configuration)?;
        tracing::debug!(path = %path.display(), "content dimension configuration loaded");
        Ok(source)
    }

    /// A source without any dimensions.
    pub fn empty() -> Self {
        Self {
            dimensions: Vec::new(),
            index_by_id: BTreeMap::new(),
        }
    }
}

impl ContentDimensionSource for ConfigurationBasedContentDimensionSource {
    fn get_dimension(&self, id: &ContentDimensionId) -> Option<&ContentDimension> {
        self.index_by_id.get(id).map(|&index| &self.dimensions[index])
    }

    fn content_dimensions_ordered_by_priority(&self) -> &[ContentDimension] {
        &self.dimensions
    }
}

fn parse_dimension(
    id: ContentDimensionId,
    raw_id: &str,
    config: &serde_json::Value,
) -> Result<ContentDimension, ConfigurationError> {
    let malformed = |reason: String| ConfigurationError::Malformed {
        dimension_id: raw_id.to_owned(),
        reason,
    };

    let config = config
        .as_object()
        .ok_or_else(|| malformed("dimension configuration must be an object".to_owned()))?;

    let values_config = config
        .get("values")
        .and_then(serde_json::Value::as_object)
        .ok_or_else(|| malformed("dimension configuration must have a \"values\" object".to_owned()))?;

    let mut values = Vec::new();
    let mut edges = Vec::new();
    for (value_name, value_config) in values_config {
        parse_value_tree(
            raw_id,
            value_name,
            value_config,
            ContentDimensionValueSpecializationDepth::ZERO,
            None,
            &mut values,
            &mut edges,
        )?;
    }

    let default_value = match config.get("defaultValue") {
        Some(serde_json::Value::String(default)) => default.clone(),
        Some(other) => {
            return Err(malformed(format!(
                "\"defaultValue\" must be a string, got {other}"
            )));
        }
        // When no default is configured, the first declared root value is it.
        None => values
            .first()
            .map(|value| value.value.clone())
            .unwrap_or_default(),
    };

    let mut dimension_configuration = serde_json::Map::new();
    for (key, value) in config {
        if !DIMENSION_STRUCTURE_KEYS.contains(&key.as_str()) {
            let _ = dimension_configuration.insert(key.clone(), value.clone());
        }
    }

    ContentDimension::new(id, values, edges, default_value, dimension_configuration)
        .map_err(ConfigurationError::Dimension)
}

fn parse_value_tree(
    dimension_id: &str,
    value_name: &str,
    config: &serde_json::Value,
    depth: ContentDimensionValueSpecializationDepth,
    generalization: Option<&str>,
    values: &mut Vec<ContentDimensionValue>,
    edges: &mut Vec<ContentDimensionValueVariationEdge>,
) -> Result<(), ConfigurationError> {
    let malformed = |reason: String| ConfigurationError::Malformed {
        dimension_id: dimension_id.to_owned(),
        reason,
    };

    let config = config.as_object().ok_or_else(|| {
        malformed(format!(
            "configuration of value \"{value_name}\" must be an object"
        ))
    })?;

    let constraints = match config.get("constraints") {
        Some(constraints_config) => parse_constraint_set(dimension_id, value_name, constraints_config)?,
        None => ContentDimensionConstraintSet::empty(),
    };

    let mut value_configuration = serde_json::Map::new();
    for (key, value) in config {
        if !VALUE_STRUCTURE_KEYS.contains(&key.as_str()) {
            let _ = value_configuration.insert(key.clone(), value.clone());
        }
    }

    let value = ContentDimensionValue::with_constraints_and_configuration(
        value_name,
        depth,
        constraints,
        value_configuration,
    )
    .map_err(ConfigurationError::Dimension)?;
    values.push(value);

    if let Some(generalization) = generalization {
        edges.push(ContentDimensionValueVariationEdge {
            specialization: value_name.to_owned(),
            generalization: generalization.to_owned(),
        });
    }

    if let Some(specializations) = config.get("specializations") {
        let specializations = specializations.as_object().ok_or_else(|| {
            malformed(format!(
                "\"specializations\" of value \"{value_name}\" must be an object"
            ))
        })?;
        for (child_name, child_config) in specializations {
            parse_value_tree(
                dimension_id,
                child_name,
                child_config,
                depth.increment(),
                Some(value_name),
                values,
                edges,
            )?;
        }
    }

    Ok(())
}

fn parse_constraint_set(
    dimension_id: &str,
    value_name: &str,
    config: &serde_json::Value,
) -> Result<ContentDimensionConstraintSet, ConfigurationError> {
    let malformed = |reason: String| ConfigurationError::Malformed {
        dimension_id: dimension_id.to_owned(),
        reason,
    };

    let config = config.as_object().ok_or_else(|| {
        malformed(format!(
            "\"constraints\" of value \"{value_name}\" must be an object"
        ))
    })?;

    let mut constraint_set = Vec::new();
    for (restricted_dimension, restrictions) in config {
        let restricted_dimension = ContentDimensionId::new(restricted_dimension)
            .map_err(ConfigurationError::Dimension)?;
        let restrictions = restrictions.as_object().ok_or_else(|| {
            malformed(format!(
                "constraints of value \"{value_name}\" towards \"{restricted_dimension}\" \
                 must be an object"
            ))
        })?;

        let mut wildcard_allowed = true;
        let mut value_overrides = BTreeMap::new();
        for (restricted_value, allowed) in restrictions {
            let allowed = allowed.as_bool().ok_or_else(|| {
                malformed(format!(
                    "constraint \"{restricted_value}\" of value \"{value_name}\" \
                     must be a boolean"
                ))
            })?;
            if restricted_value == "*" {
                wildcard_allowed = allowed;
            } else {
                let _ = value_overrides.insert(restricted_value.clone(), allowed);
            }
        }

        constraint_set.push((
            restricted_dimension,
            ContentDimensionConstraints {
                wildcard_allowed,
                value_overrides,
            },
        ));
    }

    Ok(ContentDimensionConstraintSet::from_constraints(constraint_set))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::errors::DimensionError;

    fn dim(id: &str) -> ContentDimensionId {
        ContentDimensionId::new(id).unwrap()
    }

    fn example_configuration() -> serde_json::Value {
        json!({
            "dimensionA": {
                "values": {
                    "valueA1": {
                        "constraints": {
                            "dimensionB": {
                                "*": false,
                                "valueB1": true,
                                "valueB2": false
                            }
                        },
                        "specializations": {
                            "valueA1.1": {
                                "constraints": {}
                            }
                        },
                        "dimensionValueConfiguration": {
                            "key": "value"
                        }
                    },
                    "valueA2": {
                        "constraints": {
                            "dimensionB": {
                                "*": true,
                                "valueB1": false,
                                "valueB2": true
                            }
                        }
                    }
                },
                "dimensionConfiguration": {
                    "anotherKey": "anotherValue"
                }
            },
            "dimensionB": {
                "values": {
                    "valueB1": {},
                    "valueB2": {},
                    "valueB3": {}
                }
            }
        })
    }

    fn example_source() -> ConfigurationBasedContentDimensionSource {
        ConfigurationBasedContentDimensionSource::from_configuration(&example_configuration())
            .unwrap()
    }

    #[test]
    fn empty_configuration_yields_no_dimensions() {
        let source =
            ConfigurationBasedContentDimensionSource::from_configuration(&json!({})).unwrap();
        assert!(source.content_dimensions_ordered_by_priority().is_empty());
    }

    #[test]
    fn dimensions_are_initialized_in_declaration_order() {
        let source = example_source();
        let ids: Vec<_> = source
            .content_dimensions_ordered_by_priority()
            .iter()
            .map(|d| d.id().as_str())
            .collect();
        assert_eq!(ids, vec!["dimensionA", "dimensionB"]);
    }

    #[test]
    fn values_and_depths_are_initialized() {
        let source = example_source();
        let dimension_a = source.get_dimension(&dim("dimensionA")).unwrap();

        let value_a1 = dimension_a.get_value("valueA1").unwrap();
        assert_eq!(value_a1.specialization_depth.value(), 0);
        let constraints = value_a1.constraints.get(&dim("dimensionB")).unwrap();
        assert!(!constraints.wildcard_allowed);
        assert_eq!(constraints.value_overrides.get("valueB1"), Some(&true));
        assert_eq!(constraints.value_overrides.get("valueB2"), Some(&false));

        let value_a11 = dimension_a.get_value("valueA1.1").unwrap();
        assert_eq!(value_a11.specialization_depth.value(), 1);
        assert!(value_a11.constraints.is_empty());

        let value_a2 = dimension_a.get_value("valueA2").unwrap();
        assert_eq!(value_a2.specialization_depth.value(), 0);
        let constraints = value_a2.constraints.get(&dim("dimensionB")).unwrap();
        assert!(constraints.wildcard_allowed);
        assert_eq!(constraints.value_overrides.get("valueB1"), Some(&false));
    }

    #[test]
    fn specialization_edges_follow_the_nesting() {
        let source = example_source();
        let dimension_a = source.get_dimension(&dim("dimensionA")).unwrap();

        let value_a1 = dimension_a.get_value("valueA1").unwrap();
        let children: Vec<_> = dimension_a
            .specializations(value_a1)
            .map(|v| v.value.as_str())
            .collect();
        assert_eq!(children, vec!["valueA1.1"]);

        let value_a11 = dimension_a.get_value("valueA1.1").unwrap();
        assert_eq!(dimension_a.generalization(value_a11), Some(value_a1));
        assert_eq!(dimension_a.generalization(value_a1), None);
    }

    #[test]
    fn maximum_depth_is_initialized() {
        let source = example_source();
        assert_eq!(
            source
                .get_dimension(&dim("dimensionA"))
                .unwrap()
                .maximum_depth()
                .value(),
            1
        );
        assert_eq!(
            source
                .get_dimension(&dim("dimensionB"))
                .unwrap()
                .maximum_depth()
                .value(),
            0
        );
    }

    #[test]
    fn arbitrary_keys_become_configuration() {
        let source = example_source();
        let dimension_a = source.get_dimension(&dim("dimensionA")).unwrap();

        assert_eq!(
            dimension_a.get_configuration_value("dimensionConfiguration.anotherKey"),
            Some(&json!("anotherValue"))
        );
        assert_eq!(
            dimension_a
                .get_value("valueA1")
                .unwrap()
                .get_configuration_value("dimensionValueConfiguration.key"),
            Some(&json!("value"))
        );
    }

    #[test]
    fn default_value_falls_back_to_the_first_root() {
        let source = example_source();
        assert_eq!(
            source
                .get_dimension(&dim("dimensionA"))
                .unwrap()
                .default_value()
                .value,
            "valueA1"
        );
    }

    #[test]
    fn explicit_default_value_is_honored() {
        let source = ConfigurationBasedContentDimensionSource::from_configuration(&json!({
            "dimensionB": {
                "values": { "valueB1": {}, "valueB2": {} },
                "defaultValue": "valueB2"
            }
        }))
        .unwrap();
        assert_eq!(
            source
                .get_dimension(&dim("dimensionB"))
                .unwrap()
                .default_value()
                .value,
            "valueB2"
        );
    }

    #[test]
    fn unknown_default_value_is_rejected() {
        assert_matches!(
            ConfigurationBasedContentDimensionSource::from_configuration(&json!({
                "dimensionB": {
                    "values": { "valueB1": {} },
                    "defaultValue": "valueB9"
                }
            })),
            Err(ConfigurationError::Dimension(
                DimensionError::DefaultValueIsMissing { .. }
            ))
        );
    }

    #[test]
    fn dimension_without_values_is_rejected() {
        assert_matches!(
            ConfigurationBasedContentDimensionSource::from_configuration(&json!({
                "dimensionA": { "values": {} }
            })),
            Err(ConfigurationError::Dimension(
                DimensionError::ValuesAreMissing { .. }
            ))
        );
    }

    #[test]
    fn non_object_values_are_rejected() {
        assert_matches!(
            ConfigurationBasedContentDimensionSource::from_configuration(&json!({
                "dimensionA": { "values": "nope" }
            })),
            Err(ConfigurationError::Malformed { dimension_id, .. })
                if dimension_id == "dimensionA"
        );
    }

    #[test]
    fn non_boolean_constraints_are_rejected() {
        assert_matches!(
            ConfigurationBasedContentDimensionSource::from_configuration(&json!({
                "dimensionA": {
                    "values": {
                        "valueA1": {
                            "constraints": { "dimensionB": { "valueB1": "yes" } }
                        }
                    }
                }
            })),
            Err(ConfigurationError::Malformed { .. })
        );
    }

    #[test]
    fn configuration_loads_from_a_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            serde_json::to_string(&example_configuration()).unwrap()
        )
        .unwrap();

        let source =
            ConfigurationBasedContentDimensionSource::from_json_file(file.path()).unwrap();
        assert_eq!(source.content_dimensions_ordered_by_priority().len(), 2);
    }

    #[test]
    fn missing_file_reports_the_path() {
        assert_matches!(
            ConfigurationBasedContentDimensionSource::from_json_file("/nonexistent/dimensions.json"),
            Err(ConfigurationError::Io { .. })
        );
    }
}
