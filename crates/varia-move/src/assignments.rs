//! Result DTOs of move resolution: per-point assignments and the mappings
//! emitted to the write side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use varia_space::{
    DimensionSpacePoint, DimensionSpacePointHash, DimensionSpacePointSet,
    OriginDimensionSpacePoint,
};

use crate::node::NodeAggregateId;

/// A node variant something is newly assigned to: the aggregate plus the
/// origin its content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeVariantAssignment {
    /// The assigned aggregate.
    pub node_aggregate_id: NodeAggregateId,
    /// The origin point of the assigned aggregate's relevant variant.
    pub origin_dimension_space_point: OriginDimensionSpacePoint,
}

/// Assignments per covered dimension space point, keyed by point hash.
///
/// Points without an entry receive no assignment of this kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeVariantAssignments(BTreeMap<DimensionSpacePointHash, NodeVariantAssignment>);

impl NodeVariantAssignments {
    /// No assignments.
    pub fn create() -> Self {
        Self::default()
    }

    /// Record an assignment for one covered point.
    pub fn add(&mut self, assignment: NodeVariantAssignment, covered: &DimensionSpacePoint) {
        let _ = self.0.insert(covered.hash().clone(), assignment);
    }

    /// The assignment for one covered point, if any.
    pub fn get(&self, covered_hash: &DimensionSpacePointHash) -> Option<&NodeVariantAssignment> {
        self.0.get(covered_hash)
    }

    /// Iterate assignments by covered point hash.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&DimensionSpacePointHash, &NodeVariantAssignment)> {
        self.0.iter()
    }

    /// Number of assigned points.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no point received an assignment.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The assignments of one occupied origin: where its variants get a new
/// parent and which sibling they now precede, per covered point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMoveMapping {
    /// The origin point this mapping belongs to.
    pub moved_node_origin: OriginDimensionSpacePoint,
    /// New parents per covered point; empty where the parent is unchanged.
    pub new_parent_assignments: NodeVariantAssignments,
    /// New succeeding siblings per covered point; empty means parent-only
    /// placement (append at the end).
    pub new_succeeding_sibling_assignments: NodeVariantAssignments,
}

/// All move mappings of a command, one per occupied origin, keyed by the
/// origin's hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMoveMappings(BTreeMap<DimensionSpacePointHash, NodeMoveMapping>);

impl NodeMoveMappings {
    /// Build mappings from a per-origin map.
    pub fn from_mappings(mappings: BTreeMap<DimensionSpacePointHash, NodeMoveMapping>) -> Self {
        Self(mappings)
    }

    /// The mapping of one origin, if any.
    pub fn get(&self, origin_hash: &DimensionSpacePointHash) -> Option<&NodeMoveMapping> {
        self.0.get(origin_hash)
    }

    /// Iterate mappings by origin hash.
    pub fn iter(&self) -> impl Iterator<Item = (&DimensionSpacePointHash, &NodeMoveMapping)> {
        self.0.iter()
    }

    /// Number of affected origins.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no origin is affected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the write side needs to persist a resolved move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveNodeAggregateResult {
    /// The moved aggregate.
    pub node_aggregate_id: NodeAggregateId,
    /// Parent/sibling assignments per occupied origin.
    pub mappings: NodeMoveMappings,
    /// The affected points, set only when the command carried neither parent
    /// nor siblings (a pure reposition within the existing parent).
    pub repositioned_in_points: DimensionSpacePointSet,
}
