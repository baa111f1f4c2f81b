//! Read-oracle traits over the projected content graph.
//!
//! The move resolver never mutates content; it only asks an already
//! materialized projection synchronous questions. These traits are the seam
//! to that projection — implemented elsewhere (and by the in-memory graph in
//! [`crate::testutil`] for tests).

use varia_space::{DimensionSpacePoint, DimensionSpacePointSet, OriginDimensionSpacePoint};

use crate::node::{
    ContentStreamId, Node, NodeAggregateClassification, NodeAggregateId, NodeName, NodeTypeName,
};

/// One dimension space point's view of the content tree.
///
/// Sibling queries return nodes of the same parent, nearest first, excluding
/// the reference node itself. Absent nodes are ordinary `None` results.
pub trait ContentSubgraph: Send + Sync {
    /// The node of the given aggregate as visible here, if any.
    fn find_node_by_aggregate_id(&self, aggregate_id: &NodeAggregateId) -> Option<Node>;

    /// The parent of the given aggregate's node, if any.
    fn find_parent_node(&self, aggregate_id: &NodeAggregateId) -> Option<Node>;

    /// Siblings before the given node, nearest first, stopping before
    /// `until` if given and after `limit` nodes if given.
    fn find_preceding_siblings(
        &self,
        aggregate_id: &NodeAggregateId,
        until: Option<&NodeAggregateId>,
        limit: Option<usize>,
    ) -> Vec<Node>;

    /// Siblings after the given node, nearest first, stopping before
    /// `until` if given and after `limit` nodes if given.
    fn find_succeeding_siblings(
        &self,
        aggregate_id: &NodeAggregateId,
        until: Option<&NodeAggregateId>,
        limit: Option<usize>,
    ) -> Vec<Node>;
}

/// A node aggregate's projected occupation and coverage.
///
/// An aggregate *occupies* the points its content originates in and *covers*
/// the possibly larger set of points it is visible in through variation.
pub trait NodeAggregateSnapshot: Send + Sync {
    /// The aggregate's identity.
    fn id(&self) -> &NodeAggregateId;

    /// The aggregate's node type name.
    fn node_type_name(&self) -> &NodeTypeName;

    /// The aggregate's node name, if any.
    fn node_name(&self) -> Option<&NodeName>;

    /// How the aggregate came into being.
    fn classification(&self) -> NodeAggregateClassification;

    /// The points the aggregate's content originates in.
    fn occupied_dimension_space_points(&self) -> Vec<OriginDimensionSpacePoint>;

    /// All points the aggregate is visible in.
    fn covered_dimension_space_points(&self) -> DimensionSpacePointSet;

    /// The points covered through one specific origin.
    fn coverage_by_occupant(&self, origin: &OriginDimensionSpacePoint) -> DimensionSpacePointSet;

    /// The origin whose content is visible at one covered point.
    fn occupation_by_covered(&self, covered: &DimensionSpacePoint)
    -> Option<OriginDimensionSpacePoint>;
}

/// The projected content graph of a content repository.
pub trait ContentGraph: Send + Sync {
    /// Whether the given content stream exists.
    fn has_content_stream(&self, content_stream_id: &ContentStreamId) -> bool;

    /// The subgraph of one dimension space point within a stream.
    fn subgraph(
        &self,
        content_stream_id: &ContentStreamId,
        dimension_space_point: &DimensionSpacePoint,
    ) -> Option<&dyn ContentSubgraph>;

    /// The projected aggregate of the given id within a stream.
    fn find_node_aggregate_by_id(
        &self,
        content_stream_id: &ContentStreamId,
        node_aggregate_id: &NodeAggregateId,
    ) -> Option<&dyn NodeAggregateSnapshot>;

    /// The aggregates that appear as children of the given aggregate in any
    /// subgraph of the stream.
    fn find_child_node_aggregates(
        &self,
        content_stream_id: &ContentStreamId,
        parent_node_aggregate_id: &NodeAggregateId,
    ) -> Vec<&dyn NodeAggregateSnapshot>;
}
