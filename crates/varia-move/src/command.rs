//! The move command and its distribution strategies.

use serde::{Deserialize, Serialize};
use varia_space::DimensionSpacePoint;

use crate::errors::MoveError;
use crate::node::{ContentStreamId, NodeAggregateId};

/// How many dimension space points a structural change propagates to.
///
/// Closed set — strategies are matched exhaustively, there is no extension
/// point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationDistributionStrategy {
    /// Propagate to every point the node aggregate covers.
    #[default]
    #[serde(rename = "gatherAll")]
    GatherAll,
    /// Propagate to the covered specializations of the reference point.
    #[serde(rename = "gatherSpecializations")]
    GatherSpecializations,
    /// Touch only the reference point itself.
    #[serde(rename = "scatter")]
    Scatter,
}

impl RelationDistributionStrategy {
    /// Resolve an optionally serialized strategy, defaulting to
    /// [`RelationDistributionStrategy::GatherAll`].
    pub fn from_optional_name(name: Option<&str>) -> Result<Self, MoveError> {
        match name {
            None => Ok(Self::default()),
            Some("gatherAll") => Ok(Self::GatherAll),
            Some("gatherSpecializations") => Ok(Self::GatherSpecializations),
            Some("scatter") => Ok(Self::Scatter),
            Some(other) => Err(MoveError::UnknownRelationDistributionStrategy(
                other.to_owned(),
            )),
        }
    }
}

/// Command: move a node aggregate to a new parent and/or sibling position,
/// across the dimension space points selected by the strategy.
///
/// Sibling requests are best-effort per point: where the requested sibling
/// does not exist, the resolver falls back to nearby siblings from the
/// origin's ordering, and finally to parent-only placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveNodeAggregate {
    /// The content stream the move happens in.
    pub content_stream_id: ContentStreamId,
    /// The node aggregate to move.
    pub node_aggregate_id: NodeAggregateId,
    /// The point the move was initiated in; reference for the strategy.
    pub dimension_space_point: DimensionSpacePoint,
    /// The new parent, if the node changes parents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_parent_node_aggregate_id: Option<NodeAggregateId>,
    /// The node the moved node should end up after.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_preceding_sibling_node_aggregate_id: Option<NodeAggregateId>,
    /// The node the moved node should end up before.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_succeeding_sibling_node_aggregate_id: Option<NodeAggregateId>,
    /// How far the change propagates.
    #[serde(default)]
    pub relation_distribution_strategy: RelationDistributionStrategy,
}

impl MoveNodeAggregate {
    /// Create a bare move command; position it with the builder methods.
    pub fn create(
        content_stream_id: ContentStreamId,
        node_aggregate_id: NodeAggregateId,
        dimension_space_point: DimensionSpacePoint,
        relation_distribution_strategy: RelationDistributionStrategy,
    ) -> Self {
        Self {
            content_stream_id,
            node_aggregate_id,
            dimension_space_point,
            new_parent_node_aggregate_id: None,
            new_preceding_sibling_node_aggregate_id: None,
            new_succeeding_sibling_node_aggregate_id: None,
            relation_distribution_strategy,
        }
    }

    /// Request a new parent.
    pub fn with_new_parent(mut self, parent_node_aggregate_id: NodeAggregateId) -> Self {
        self.new_parent_node_aggregate_id = Some(parent_node_aggregate_id);
        self
    }

    /// Request a position after the given sibling.
    pub fn with_new_preceding_sibling(mut self, sibling_node_aggregate_id: NodeAggregateId) -> Self {
        self.new_preceding_sibling_node_aggregate_id = Some(sibling_node_aggregate_id);
        self
    }

    /// Request a position before the given sibling.
    pub fn with_new_succeeding_sibling(
        mut self,
        sibling_node_aggregate_id: NodeAggregateId,
    ) -> Self {
        self.new_succeeding_sibling_node_aggregate_id = Some(sibling_node_aggregate_id);
        self
    }
}
