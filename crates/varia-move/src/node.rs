//! Branded node identity types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use varia_space::OriginDimensionSpacePoint;

use crate::errors::IdentityIsInvalid;

macro_rules! branded_string_id {
    ($(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Arc<str>);

        impl $name {
            /// Wrap a non-empty string.
            pub fn new(value: impl AsRef<str>) -> Result<Self, IdentityIsInvalid> {
                let value = value.as_ref();
                if value.is_empty() {
                    return Err(IdentityIsInvalid { kind: $kind });
                }
                Ok(Self(Arc::from(value)))
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentityIsInvalid;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdentityIsInvalid;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }
    };
}

branded_string_id!(
    /// Identity of a node across all of its dimension space variants.
    ///
    /// Freshly generated ids are UUIDv7; arbitrary non-empty strings are
    /// accepted so fixtures stay readable.
    NodeAggregateId,
    "node aggregate id"
);

branded_string_id!(
    /// Identity of a content stream (the fork content is written against).
    ContentStreamId,
    "content stream id"
);

branded_string_id!(
    /// A node's name below its parent, e.g. `"main"` or `"teaser"`.
    NodeName,
    "node name"
);

branded_string_id!(
    /// Name of a node's type, e.g. `"Acme.Site:Document"`.
    NodeTypeName,
    "node type name"
);

impl NodeAggregateId {
    /// Generate a fresh, time-ordered id.
    pub fn generate() -> Self {
        Self(Arc::from(uuid::Uuid::now_v7().to_string().as_str()))
    }
}

impl ContentStreamId {
    /// Generate a fresh, time-ordered id.
    pub fn generate() -> Self {
        Self(Arc::from(uuid::Uuid::now_v7().to_string().as_str()))
    }
}

/// How a node aggregate came into being.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeAggregateClassification {
    /// A root aggregate; exists outside the regular tree and cannot move.
    Root,
    /// A regular, user-created aggregate.
    Regular,
    /// Auto-created alongside its parent; moves with it, never alone.
    Tethered,
}

impl NodeAggregateClassification {
    /// Whether this is the root classification.
    pub fn is_root(self) -> bool {
        matches!(self, Self::Root)
    }

    /// Whether this is the tethered classification.
    pub fn is_tethered(self) -> bool {
        matches!(self, Self::Tethered)
    }
}

/// One node as visible in one subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// The aggregate the node belongs to.
    pub aggregate_id: NodeAggregateId,
    /// The point the node's content originates in.
    pub origin_dimension_space_point: OriginDimensionSpacePoint,
    /// The node's name below its parent, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NodeName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifiers_are_rejected() {
        assert!(NodeAggregateId::new("").is_err());
        assert!(ContentStreamId::new("").is_err());
        assert!(NodeName::new("").is_err());
        assert!(NodeTypeName::new("").is_err());
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(NodeAggregateId::generate(), NodeAggregateId::generate());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = NodeAggregateId::new("nody-mc-nodeface").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"nody-mc-nodeface\"");
    }

    #[test]
    fn classification_predicates() {
        assert!(NodeAggregateClassification::Root.is_root());
        assert!(NodeAggregateClassification::Tethered.is_tethered());
        assert!(!NodeAggregateClassification::Regular.is_root());
        assert!(!NodeAggregateClassification::Regular.is_tethered());
    }
}
