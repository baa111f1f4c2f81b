//! In-memory content graph for resolver tests.
//!
//! Builds per-point subgraphs from explicit child lists and derives aggregate
//! occupation/coverage from them, so fixtures cannot drift out of sync with
//! the trees they describe.

use std::collections::BTreeMap;

use varia_space::{
    DimensionSpacePoint, DimensionSpacePointHash, DimensionSpacePointSet,
    OriginDimensionSpacePoint,
};

use crate::content_graph::{ContentGraph, ContentSubgraph, NodeAggregateSnapshot};
use crate::node::{
    ContentStreamId, Node, NodeAggregateClassification, NodeAggregateId, NodeName, NodeTypeName,
};

/// Initialize tracing for tests (idempotent).
pub fn init_test_tracing() {
    varia_dimension::logging::init_tracing();
}

/// One dimension space point's tree, with ordered child lists.
#[derive(Debug, Default)]
pub struct TestSubgraph {
    nodes: BTreeMap<NodeAggregateId, Node>,
    parents: BTreeMap<NodeAggregateId, NodeAggregateId>,
    children: BTreeMap<NodeAggregateId, Vec<NodeAggregateId>>,
}

impl TestSubgraph {
    /// Add a node without a parent.
    pub fn add_root(&mut self, node: Node) {
        let _ = self.nodes.insert(node.aggregate_id.clone(), node);
    }

    /// Append a node to a parent's child list.
    pub fn add_child(&mut self, parent_id: &NodeAggregateId, node: Node) {
        let _ = self.parents.insert(node.aggregate_id.clone(), parent_id.clone());
        self.children
            .entry(parent_id.clone())
            .or_default()
            .push(node.aggregate_id.clone());
        let _ = self.nodes.insert(node.aggregate_id.clone(), node);
    }

    fn siblings(
        &self,
        aggregate_id: &NodeAggregateId,
        until: Option<&NodeAggregateId>,
        limit: Option<usize>,
        preceding: bool,
    ) -> Vec<Node> {
        let Some(parent_id) = self.parents.get(aggregate_id) else {
            return Vec::new();
        };
        let Some(children) = self.children.get(parent_id) else {
            return Vec::new();
        };
        let Some(position) = children.iter().position(|child| child == aggregate_id) else {
            return Vec::new();
        };

        let ordered: Vec<&NodeAggregateId> = if preceding {
            children[..position].iter().rev().collect()
        } else {
            children[position + 1..].iter().collect()
        };

        let mut siblings = Vec::new();
        for sibling_id in ordered {
            if until.is_some_and(|until| until == sibling_id) {
                break;
            }
            if limit.is_some_and(|limit| siblings.len() >= limit) {
                break;
            }
            if let Some(node) = self.nodes.get(sibling_id) {
                siblings.push(node.clone());
            }
        }
        siblings
    }
}

impl ContentSubgraph for TestSubgraph {
    fn find_node_by_aggregate_id(&self, aggregate_id: &NodeAggregateId) -> Option<Node> {
        self.nodes.get(aggregate_id).cloned()
    }

    fn find_parent_node(&self, aggregate_id: &NodeAggregateId) -> Option<Node> {
        let parent_id = self.parents.get(aggregate_id)?;
        self.nodes.get(parent_id).cloned()
    }

    fn find_preceding_siblings(
        &self,
        aggregate_id: &NodeAggregateId,
        until: Option<&NodeAggregateId>,
        limit: Option<usize>,
    ) -> Vec<Node> {
        self.siblings(aggregate_id, until, limit, true)
    }

    fn find_succeeding_siblings(
        &self,
        aggregate_id: &NodeAggregateId,
        until: Option<&NodeAggregateId>,
        limit: Option<usize>,
    ) -> Vec<Node> {
        self.siblings(aggregate_id, until, limit, false)
    }
}

/// A node aggregate snapshot derived from the subgraphs it appears in.
#[derive(Debug)]
pub struct TestNodeAggregate {
    id: NodeAggregateId,
    node_type_name: NodeTypeName,
    node_name: Option<NodeName>,
    classification: NodeAggregateClassification,
    occupied: Vec<OriginDimensionSpacePoint>,
    covered: DimensionSpacePointSet,
    coverage_by_occupant: BTreeMap<DimensionSpacePointHash, DimensionSpacePointSet>,
    occupation_by_covered: BTreeMap<DimensionSpacePointHash, OriginDimensionSpacePoint>,
}

impl NodeAggregateSnapshot for TestNodeAggregate {
    fn id(&self) -> &NodeAggregateId {
        &self.id
    }

    fn node_type_name(&self) -> &NodeTypeName {
        &self.node_type_name
    }

    fn node_name(&self) -> Option<&NodeName> {
        self.node_name.as_ref()
    }

    fn classification(&self) -> NodeAggregateClassification {
        self.classification
    }

    fn occupied_dimension_space_points(&self) -> Vec<OriginDimensionSpacePoint> {
        self.occupied.clone()
    }

    fn covered_dimension_space_points(&self) -> DimensionSpacePointSet {
        self.covered.clone()
    }

    fn coverage_by_occupant(&self, origin: &OriginDimensionSpacePoint) -> DimensionSpacePointSet {
        self.coverage_by_occupant
            .get(origin.hash())
            .cloned()
            .unwrap_or_default()
    }

    fn occupation_by_covered(
        &self,
        covered: &DimensionSpacePoint,
    ) -> Option<OriginDimensionSpacePoint> {
        self.occupation_by_covered.get(covered.hash()).cloned()
    }
}

/// An in-memory content graph for a single content stream.
#[derive(Default)]
pub struct TestContentGraph {
    content_stream_id: Option<ContentStreamId>,
    subgraphs: BTreeMap<DimensionSpacePointHash, (DimensionSpacePoint, TestSubgraph)>,
    aggregates: BTreeMap<NodeAggregateId, TestNodeAggregate>,
}

impl TestContentGraph {
    /// A graph holding the given content stream.
    pub fn new(content_stream_id: ContentStreamId) -> Self {
        Self {
            content_stream_id: Some(content_stream_id),
            ..Self::default()
        }
    }

    /// The subgraph of one point, created on first access.
    pub fn subgraph_mut(&mut self, point: &DimensionSpacePoint) -> &mut TestSubgraph {
        &mut self
            .subgraphs
            .entry(point.hash().clone())
            .or_insert_with(|| (point.clone(), TestSubgraph::default()))
            .1
    }

    /// Derive an aggregate snapshot from the node's appearances across all
    /// subgraphs and register it.
    pub fn derive_aggregate(
        &mut self,
        id: &NodeAggregateId,
        node_type_name: NodeTypeName,
        node_name: Option<NodeName>,
        classification: NodeAggregateClassification,
    ) {
        let mut occupied: Vec<OriginDimensionSpacePoint> = Vec::new();
        let mut covered = DimensionSpacePointSet::empty();
        let mut coverage_by_occupant: BTreeMap<DimensionSpacePointHash, DimensionSpacePointSet> =
            BTreeMap::new();
        let mut occupation_by_covered: BTreeMap<DimensionSpacePointHash, OriginDimensionSpacePoint> =
            BTreeMap::new();

        for (point, subgraph) in self.subgraphs.values() {
            let Some(node) = subgraph.nodes.get(id) else {
                continue;
            };
            let origin = node.origin_dimension_space_point.clone();
            let _ = covered.insert(point.clone());
            let _ = coverage_by_occupant
                .entry(origin.hash().clone())
                .or_default()
                .insert(point.clone());
            let _ = occupation_by_covered.insert(point.hash().clone(), origin.clone());
            if !occupied.contains(&origin) {
                occupied.push(origin);
            }
        }

        let _ = self.aggregates.insert(
            id.clone(),
            TestNodeAggregate {
                id: id.clone(),
                node_type_name,
                node_name,
                classification,
                occupied,
                covered,
                coverage_by_occupant,
                occupation_by_covered,
            },
        );
    }
}

impl ContentGraph for TestContentGraph {
    fn has_content_stream(&self, content_stream_id: &ContentStreamId) -> bool {
        self.content_stream_id.as_ref() == Some(content_stream_id)
    }

    fn subgraph(
        &self,
        content_stream_id: &ContentStreamId,
        dimension_space_point: &DimensionSpacePoint,
    ) -> Option<&dyn ContentSubgraph> {
        if !self.has_content_stream(content_stream_id) {
            return None;
        }
        self.subgraphs
            .get(dimension_space_point.hash())
            .map(|(_, subgraph)| subgraph as &dyn ContentSubgraph)
    }

    fn find_node_aggregate_by_id(
        &self,
        content_stream_id: &ContentStreamId,
        node_aggregate_id: &NodeAggregateId,
    ) -> Option<&dyn NodeAggregateSnapshot> {
        if !self.has_content_stream(content_stream_id) {
            return None;
        }
        self.aggregates
            .get(node_aggregate_id)
            .map(|aggregate| aggregate as &dyn NodeAggregateSnapshot)
    }

    fn find_child_node_aggregates(
        &self,
        content_stream_id: &ContentStreamId,
        parent_node_aggregate_id: &NodeAggregateId,
    ) -> Vec<&dyn NodeAggregateSnapshot> {
        if !self.has_content_stream(content_stream_id) {
            return Vec::new();
        }
        let mut child_ids: Vec<&NodeAggregateId> = Vec::new();
        for (_, subgraph) in self.subgraphs.values() {
            if let Some(children) = subgraph.children.get(parent_node_aggregate_id) {
                for child in children {
                    if !child_ids.contains(&child) {
                        child_ids.push(child);
                    }
                }
            }
        }
        child_ids
            .into_iter()
            .filter_map(|child_id| self.aggregates.get(child_id))
            .map(|aggregate| aggregate as &dyn NodeAggregateSnapshot)
            .collect()
    }
}
