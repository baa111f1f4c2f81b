//! Resolver tests against the in-memory content graph.
//!
//! Fixture: one dimension `market` with `eu → de/fr`. The standard tree in
//! every point, all nodes originating in `eu`:
//!
//! ```text
//! root
//! ├── parent-a: [sib-a, node, sib-b, sib-c]
//! │              └── (node) child-a
//! └── parent-b: []
//! ```

use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use varia_dimension::ConfigurationBasedContentDimensionSource;
use varia_space::{DimensionSpacePoint, InterDimensionalVariationGraph, OriginDimensionSpacePoint};

use super::*;
use crate::command::RelationDistributionStrategy::{GatherAll, GatherSpecializations, Scatter};
use crate::errors::MoveError;
use crate::node::{ContentStreamId, NodeAggregateClassification, NodeName, NodeTypeName};
use crate::testutil::{TestContentGraph, TestSubgraph, init_test_tracing};

fn variation_graph() -> InterDimensionalVariationGraph {
    InterDimensionalVariationGraph::new(Arc::new(
        ConfigurationBasedContentDimensionSource::from_configuration(&json!({
            "market": {
                "values": { "eu": { "specializations": { "de": {}, "fr": {} } } }
            }
        }))
        .unwrap(),
    ))
}

fn stream() -> ContentStreamId {
    ContentStreamId::new("cs-identifier").unwrap()
}

fn point(market: &str) -> DimensionSpacePoint {
    DimensionSpacePoint::from_raw([("market", market)]).unwrap()
}

fn id(raw: &str) -> NodeAggregateId {
    NodeAggregateId::new(raw).unwrap()
}

fn document() -> NodeTypeName {
    NodeTypeName::new("Acme.Site:Document").unwrap()
}

fn node(raw_id: &str) -> Node {
    Node {
        aggregate_id: id(raw_id),
        origin_dimension_space_point: OriginDimensionSpacePoint::from(point("eu")),
        name: None,
    }
}

fn named_node(raw_id: &str, raw_name: &str) -> Node {
    Node {
        name: Some(NodeName::new(raw_name).unwrap()),
        ..node(raw_id)
    }
}

fn standard_tree(subgraph: &mut TestSubgraph) {
    subgraph.add_root(node("root"));
    subgraph.add_child(&id("root"), node("parent-a"));
    subgraph.add_child(&id("root"), node("parent-b"));
    subgraph.add_child(&id("parent-a"), node("sib-a"));
    subgraph.add_child(&id("parent-a"), named_node("node", "teaser"));
    subgraph.add_child(&id("parent-a"), node("sib-b"));
    subgraph.add_child(&id("parent-a"), node("sib-c"));
    subgraph.add_child(&id("node"), node("child-a"));
}

struct Fixture {
    variation_graph: InterDimensionalVariationGraph,
    content: TestContentGraph,
}

impl Fixture {
    /// The standard tree in all three points.
    fn standard() -> Self {
        Self::with_trees(|content| {
            for market in ["eu", "de", "fr"] {
                standard_tree(content.subgraph_mut(&point(market)));
            }
        })
    }

    fn with_trees(build: impl FnOnce(&mut TestContentGraph)) -> Self {
        init_test_tracing();
        let mut content = TestContentGraph::new(stream());
        build(&mut content);
        for raw_id in [
            "root", "parent-a", "parent-b", "sib-a", "sib-b", "sib-c", "sib-d", "extra",
            "child-a",
        ] {
            let classification = if raw_id == "root" {
                NodeAggregateClassification::Root
            } else {
                NodeAggregateClassification::Regular
            };
            content.derive_aggregate(&id(raw_id), document(), None, classification);
        }
        content.derive_aggregate(
            &id("node"),
            document(),
            Some(NodeName::new("teaser").unwrap()),
            NodeAggregateClassification::Regular,
        );
        content.derive_aggregate(
            &id("taken"),
            document(),
            Some(NodeName::new("teaser").unwrap()),
            NodeAggregateClassification::Regular,
        );
        content.derive_aggregate(
            &id("tether"),
            document(),
            None,
            NodeAggregateClassification::Tethered,
        );
        Self {
            variation_graph: variation_graph(),
            content,
        }
    }

    fn resolve(&self, command: &MoveNodeAggregate) -> Result<MoveNodeAggregateResult, MoveError> {
        NodeAggregateMoveResolver::new(&self.variation_graph, &self.content).resolve(command)
    }
}

fn command(market: &str, strategy: RelationDistributionStrategy) -> MoveNodeAggregate {
    MoveNodeAggregate::create(stream(), id("node"), point(market), strategy)
}

/// The single mapping of a result (all fixtures occupy only `eu`).
fn single_mapping(result: &MoveNodeAggregateResult) -> &NodeMoveMapping {
    assert_eq!(result.mappings.len(), 1);
    let (_, mapping) = result.mappings.iter().next().unwrap();
    assert_eq!(
        mapping.moved_node_origin,
        OriginDimensionSpacePoint::from(point("eu"))
    );
    mapping
}

fn sibling_in<'a>(mapping: &'a NodeMoveMapping, market: &str) -> Option<&'a NodeVariantAssignment> {
    mapping
        .new_succeeding_sibling_assignments
        .get(point(market).hash())
}

fn parent_in<'a>(mapping: &'a NodeMoveMapping, market: &str) -> Option<&'a NodeVariantAssignment> {
    mapping.new_parent_assignments.get(point(market).hash())
}

// ─────────────────────────────────────────────────────────────────────────────
// Happy paths and strategies
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn requested_sibling_resolves_in_every_covered_point() {
    let fixture = Fixture::standard();
    let result = fixture
        .resolve(&command("eu", GatherAll).with_new_succeeding_sibling(id("sib-b")))
        .unwrap();

    let mapping = single_mapping(&result);
    for market in ["eu", "de", "fr"] {
        assert_eq!(
            sibling_in(mapping, market).unwrap().node_aggregate_id,
            id("sib-b"),
            "sibling in {market}"
        );
    }
    // sib-b's parent is the node's current parent everywhere: no parent moves
    assert!(mapping.new_parent_assignments.is_empty());
    assert!(result.repositioned_in_points.is_empty());
}

#[test]
fn scatter_affects_only_the_reference_point() {
    let fixture = Fixture::standard();
    let result = fixture
        .resolve(&command("de", Scatter).with_new_succeeding_sibling(id("sib-b")))
        .unwrap();

    let mapping = single_mapping(&result);
    assert_eq!(mapping.new_succeeding_sibling_assignments.len(), 1);
    assert_eq!(
        sibling_in(mapping, "de").unwrap().node_aggregate_id,
        id("sib-b")
    );
    assert_eq!(sibling_in(mapping, "eu"), None);
    assert_eq!(sibling_in(mapping, "fr"), None);
}

#[test]
fn gather_specializations_excludes_covered_generalizations() {
    let fixture = Fixture::standard();
    let result = fixture
        .resolve(&command("de", GatherSpecializations).with_new_succeeding_sibling(id("sib-b")))
        .unwrap();

    // eu is covered but is a generalization of the reference point de
    let mapping = single_mapping(&result);
    assert_eq!(mapping.new_succeeding_sibling_assignments.len(), 1);
    assert!(sibling_in(mapping, "de").is_some());
    assert_eq!(sibling_in(mapping, "eu"), None);
}

#[test]
fn gather_specializations_from_the_root_point_gathers_everything() {
    let fixture = Fixture::standard();
    let result = fixture
        .resolve(&command("eu", GatherSpecializations).with_new_succeeding_sibling(id("sib-b")))
        .unwrap();

    let mapping = single_mapping(&result);
    assert_eq!(mapping.new_succeeding_sibling_assignments.len(), 3);
}

#[test]
fn pure_reposition_reports_the_affected_points() {
    let fixture = Fixture::standard();
    let result = fixture.resolve(&command("de", GatherSpecializations)).unwrap();

    let mapping = single_mapping(&result);
    assert!(mapping.new_parent_assignments.is_empty());
    assert!(mapping.new_succeeding_sibling_assignments.is_empty());
    assert_eq!(
        result.repositioned_in_points,
        [point("de")].into_iter().collect()
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Parent assignment
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn an_explicit_parent_is_assigned_to_every_affected_point() {
    let fixture = Fixture::standard();
    let result = fixture
        .resolve(&command("eu", GatherAll).with_new_parent(id("parent-b")))
        .unwrap();

    let mapping = single_mapping(&result);
    for market in ["eu", "de", "fr"] {
        let assignment = parent_in(mapping, market).unwrap();
        assert_eq!(assignment.node_aggregate_id, id("parent-b"));
        assert_eq!(
            assignment.origin_dimension_space_point,
            OriginDimensionSpacePoint::from(point("eu"))
        );
    }
    assert!(mapping.new_succeeding_sibling_assignments.is_empty());
    assert!(result.repositioned_in_points.is_empty());
}

#[test]
fn the_parent_is_derived_from_the_siblings_actual_parent() {
    // in de, sib-b lives under parent-b instead of parent-a
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "fr"] {
            standard_tree(content.subgraph_mut(&point(market)));
        }
        let subgraph = content.subgraph_mut(&point("de"));
        subgraph.add_root(node("root"));
        subgraph.add_child(&id("root"), node("parent-a"));
        subgraph.add_child(&id("root"), node("parent-b"));
        subgraph.add_child(&id("parent-a"), node("sib-a"));
        subgraph.add_child(&id("parent-a"), named_node("node", "teaser"));
        subgraph.add_child(&id("parent-a"), node("sib-c"));
        subgraph.add_child(&id("parent-b"), node("sib-b"));
    });

    let result = fixture
        .resolve(&command("eu", GatherAll).with_new_succeeding_sibling(id("sib-b")))
        .unwrap();

    let mapping = single_mapping(&result);
    // the sibling resolves everywhere
    for market in ["eu", "de", "fr"] {
        assert_eq!(
            sibling_in(mapping, market).unwrap().node_aggregate_id,
            id("sib-b")
        );
    }
    // only in de its parent differs from the node's current parent
    assert_eq!(
        parent_in(mapping, "de").unwrap().node_aggregate_id,
        id("parent-b")
    );
    assert_eq!(parent_in(mapping, "eu"), None);
    assert_eq!(parent_in(mapping, "fr"), None);
}

#[test]
fn a_parent_constraint_disqualifies_siblings_under_other_parents() {
    // sib-b is under parent-a everywhere, but parent-b is requested
    let fixture = Fixture::standard();
    let result = fixture
        .resolve(
            &command("eu", GatherAll)
                .with_new_parent(id("parent-b"))
                .with_new_succeeding_sibling(id("sib-b")),
        )
        .unwrap();

    let mapping = single_mapping(&result);
    assert!(mapping.new_succeeding_sibling_assignments.is_empty());
    assert_eq!(mapping.new_parent_assignments.len(), 3);
}

#[test]
fn a_sibling_under_the_requested_parent_counts_where_it_exists() {
    // parent-b has a child sib-d only in de
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "de", "fr"] {
            standard_tree(content.subgraph_mut(&point(market)));
        }
        content
            .subgraph_mut(&point("de"))
            .add_child(&id("parent-b"), node("sib-d"));
    });

    let result = fixture
        .resolve(
            &command("eu", GatherAll)
                .with_new_parent(id("parent-b"))
                .with_new_succeeding_sibling(id("sib-d")),
        )
        .unwrap();

    let mapping = single_mapping(&result);
    assert_eq!(
        sibling_in(mapping, "de").unwrap().node_aggregate_id,
        id("sib-d")
    );
    assert_eq!(sibling_in(mapping, "eu"), None);
    assert_eq!(sibling_in(mapping, "fr"), None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Sibling fallbacks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn the_preceding_siblings_successor_is_used_skipping_the_moved_node() {
    let fixture = Fixture::standard();
    let result = fixture
        .resolve(&command("eu", GatherAll).with_new_preceding_sibling(id("sib-a")))
        .unwrap();

    // sib-a's successors are [node, sib-b]; the moved node is skipped
    let mapping = single_mapping(&result);
    for market in ["eu", "de", "fr"] {
        assert_eq!(
            sibling_in(mapping, market).unwrap().node_aggregate_id,
            id("sib-b")
        );
    }
}

#[test]
fn a_preceding_sibling_at_the_end_means_parent_only_placement() {
    let fixture = Fixture::standard();
    let result = fixture
        .resolve(&command("eu", GatherAll).with_new_preceding_sibling(id("sib-c")))
        .unwrap();

    let mapping = single_mapping(&result);
    assert!(mapping.new_succeeding_sibling_assignments.is_empty());
    assert!(mapping.new_parent_assignments.is_empty());
}

#[test]
fn the_lockstep_search_falls_back_to_the_next_origin_sibling() {
    // de has no sib-b: the origin's next succeeding sibling sib-c is used
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "fr"] {
            standard_tree(content.subgraph_mut(&point(market)));
        }
        let subgraph = content.subgraph_mut(&point("de"));
        subgraph.add_root(node("root"));
        subgraph.add_child(&id("root"), node("parent-a"));
        subgraph.add_child(&id("root"), node("parent-b"));
        subgraph.add_child(&id("parent-a"), node("sib-a"));
        subgraph.add_child(&id("parent-a"), named_node("node", "teaser"));
        subgraph.add_child(&id("parent-a"), node("sib-c"));
    });

    let result = fixture
        .resolve(&command("eu", GatherAll).with_new_succeeding_sibling(id("sib-b")))
        .unwrap();

    let mapping = single_mapping(&result);
    assert_eq!(
        sibling_in(mapping, "eu").unwrap().node_aggregate_id,
        id("sib-b")
    );
    assert_eq!(
        sibling_in(mapping, "de").unwrap().node_aggregate_id,
        id("sib-c")
    );
    assert_eq!(
        sibling_in(mapping, "fr").unwrap().node_aggregate_id,
        id("sib-b")
    );
}

#[test]
fn the_lockstep_search_prefers_the_succeeding_side() {
    // de lacks both requested siblings (sib-b, sib-c). At distance 0 both
    // sides resolve: the preceding side via sib-a (whose successor in de is
    // "extra"), the succeeding side via sib-d. The succeeding side wins.
    let wide_tree = |subgraph: &mut TestSubgraph| {
        subgraph.add_root(node("root"));
        subgraph.add_child(&id("root"), node("parent-a"));
        subgraph.add_child(&id("root"), node("parent-b"));
        subgraph.add_child(&id("parent-a"), node("sib-a"));
        subgraph.add_child(&id("parent-a"), node("sib-b"));
        subgraph.add_child(&id("parent-a"), named_node("node", "teaser"));
        subgraph.add_child(&id("parent-a"), node("sib-c"));
        subgraph.add_child(&id("parent-a"), node("sib-d"));
    };
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "fr"] {
            wide_tree(content.subgraph_mut(&point(market)));
        }
        let subgraph = content.subgraph_mut(&point("de"));
        subgraph.add_root(node("root"));
        subgraph.add_child(&id("root"), node("parent-a"));
        subgraph.add_child(&id("root"), node("parent-b"));
        subgraph.add_child(&id("parent-a"), node("sib-a"));
        subgraph.add_child(&id("parent-a"), node("extra"));
        subgraph.add_child(&id("parent-a"), named_node("node", "teaser"));
        subgraph.add_child(&id("parent-a"), node("sib-d"));
    });

    let result = fixture
        .resolve(
            &command("eu", GatherAll)
                .with_new_preceding_sibling(id("sib-b"))
                .with_new_succeeding_sibling(id("sib-c")),
        )
        .unwrap();

    let mapping = single_mapping(&result);
    assert_eq!(
        sibling_in(mapping, "de").unwrap().node_aggregate_id,
        id("sib-d")
    );
    // the requested sibling still wins where it exists
    assert_eq!(
        sibling_in(mapping, "eu").unwrap().node_aggregate_id,
        id("sib-c")
    );
}

#[test]
fn the_lockstep_search_resolves_preceding_candidates_to_their_successor() {
    // de lacks sib-b and sib-c (the succeeding side is exhausted); the
    // preceding candidate sib-a resolves, and its successor in de is "extra"
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "fr"] {
            standard_tree(content.subgraph_mut(&point(market)));
        }
        let subgraph = content.subgraph_mut(&point("de"));
        subgraph.add_root(node("root"));
        subgraph.add_child(&id("root"), node("parent-a"));
        subgraph.add_child(&id("root"), node("parent-b"));
        subgraph.add_child(&id("parent-a"), node("sib-a"));
        subgraph.add_child(&id("parent-a"), node("extra"));
        subgraph.add_child(&id("parent-a"), named_node("node", "teaser"));
    });

    let result = fixture
        .resolve(
            &command("eu", GatherAll)
                .with_new_preceding_sibling(id("sib-b"))
                .with_new_succeeding_sibling(id("sib-c")),
        )
        .unwrap();

    let mapping = single_mapping(&result);
    assert_eq!(
        sibling_in(mapping, "de").unwrap().node_aggregate_id,
        id("extra")
    );
    // in eu and fr the requested succeeding sibling exists directly
    assert_eq!(
        sibling_in(mapping, "eu").unwrap().node_aggregate_id,
        id("sib-c")
    );
}

#[test]
fn unresolvable_siblings_yield_parent_only_placement() {
    // de has no siblings at all next to the node
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "fr"] {
            standard_tree(content.subgraph_mut(&point(market)));
        }
        let subgraph = content.subgraph_mut(&point("de"));
        subgraph.add_root(node("root"));
        subgraph.add_child(&id("root"), node("parent-a"));
        subgraph.add_child(&id("root"), node("parent-b"));
        subgraph.add_child(&id("parent-a"), named_node("node", "teaser"));
    });

    let result = fixture
        .resolve(&command("eu", GatherAll).with_new_succeeding_sibling(id("sib-b")))
        .unwrap();

    let mapping = single_mapping(&result);
    assert!(sibling_in(mapping, "de").is_none());
    assert!(sibling_in(mapping, "eu").is_some());
    assert!(sibling_in(mapping, "fr").is_some());
}

// ─────────────────────────────────────────────────────────────────────────────
// Preconditions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn a_missing_content_stream_rejects_the_command() {
    let fixture = Fixture::standard();
    let mut command = command("eu", GatherAll);
    command.content_stream_id = ContentStreamId::new("cs-elsewhere").unwrap();

    assert_matches!(
        fixture.resolve(&command),
        Err(MoveError::ContentStreamDoesNotExist { .. })
    );
}

#[test]
fn a_reference_point_outside_the_subspace_rejects_the_command() {
    let fixture = Fixture::standard();
    assert_matches!(
        fixture.resolve(&command("asia", GatherAll)),
        Err(MoveError::DimensionSpace(_))
    );
}

#[test]
fn a_missing_node_aggregate_rejects_the_command() {
    let fixture = Fixture::standard();
    let mut command = command("eu", GatherAll);
    command.node_aggregate_id = id("ghost");

    assert_matches!(
        fixture.resolve(&command),
        Err(MoveError::NodeAggregateCurrentlyDoesNotExist { node_aggregate_id })
            if node_aggregate_id == id("ghost")
    );
}

#[test]
fn root_aggregates_cannot_be_moved() {
    let fixture = Fixture::standard();
    let mut command = command("eu", GatherAll);
    command.node_aggregate_id = id("root");

    assert_matches!(
        fixture.resolve(&command),
        Err(MoveError::NodeAggregateIsRoot { .. })
    );
}

#[test]
fn tethered_aggregates_cannot_be_moved() {
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "de", "fr"] {
            standard_tree(content.subgraph_mut(&point(market)));
            content
                .subgraph_mut(&point(market))
                .add_child(&id("parent-a"), node("tether"));
        }
    });
    let mut command = command("eu", GatherAll);
    command.node_aggregate_id = id("tether");

    assert_matches!(
        fixture.resolve(&command),
        Err(MoveError::NodeAggregateIsTethered { .. })
    );
}

#[test]
fn the_node_must_cover_the_reference_point() {
    // the node exists in eu and de only
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "de"] {
            standard_tree(content.subgraph_mut(&point(market)));
        }
        let subgraph = content.subgraph_mut(&point("fr"));
        subgraph.add_root(node("root"));
        subgraph.add_child(&id("root"), node("parent-a"));
    });

    assert_matches!(
        fixture.resolve(&command("fr", GatherAll)),
        Err(MoveError::NodeAggregateDoesNotCoverDimensionSpacePoint { node_aggregate_id, .. })
            if node_aggregate_id == id("node")
    );
}

#[test]
fn the_new_parent_must_cover_every_affected_point() {
    // parent-b is missing from fr
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "de"] {
            standard_tree(content.subgraph_mut(&point(market)));
        }
        let subgraph = content.subgraph_mut(&point("fr"));
        subgraph.add_root(node("root"));
        subgraph.add_child(&id("root"), node("parent-a"));
        subgraph.add_child(&id("parent-a"), named_node("node", "teaser"));
    });

    assert_matches!(
        fixture.resolve(&command("eu", GatherAll).with_new_parent(id("parent-b"))),
        Err(MoveError::NodeAggregateDoesNotCoverDimensionSpacePoint { node_aggregate_id, .. })
            if node_aggregate_id == id("parent-b")
    );
}

#[test]
fn the_new_parent_must_not_be_a_descendant_of_the_moved_node() {
    let fixture = Fixture::standard();

    assert_matches!(
        fixture.resolve(&command("eu", GatherAll).with_new_parent(id("child-a"))),
        Err(MoveError::NodeAggregateIsDescendant { node_aggregate_id, .. })
            if node_aggregate_id == id("child-a")
    );
    assert_matches!(
        fixture.resolve(&command("eu", GatherAll).with_new_parent(id("node"))),
        Err(MoveError::NodeAggregateIsDescendant { .. })
    );
}

#[test]
fn the_nodes_name_must_be_free_under_the_new_parent() {
    // parent-b already has a child named "teaser" in de
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "de", "fr"] {
            standard_tree(content.subgraph_mut(&point(market)));
        }
        content
            .subgraph_mut(&point("de"))
            .add_child(&id("parent-b"), named_node("taken", "teaser"));
    });

    assert_matches!(
        fixture.resolve(&command("eu", GatherAll).with_new_parent(id("parent-b"))),
        Err(MoveError::NodeNameIsAlreadyCovered { node_name, .. })
            if node_name.as_str() == "teaser"
    );
}

#[test]
fn name_collisions_outside_the_affected_points_are_tolerated() {
    // the colliding name only exists in de, but only eu is affected
    let fixture = Fixture::with_trees(|content| {
        for market in ["eu", "de", "fr"] {
            standard_tree(content.subgraph_mut(&point(market)));
        }
        content
            .subgraph_mut(&point("de"))
            .add_child(&id("parent-b"), named_node("taken", "teaser"));
    });

    let result = fixture.resolve(&command("eu", Scatter).with_new_parent(id("parent-b")));
    assert!(result.is_ok());
}

#[test]
fn missing_sibling_aggregates_reject_the_command() {
    let fixture = Fixture::standard();
    assert_matches!(
        fixture.resolve(&command("eu", GatherAll).with_new_succeeding_sibling(id("ghost"))),
        Err(MoveError::NodeAggregateCurrentlyDoesNotExist { .. })
    );
}

#[test]
fn a_node_without_a_parent_in_its_own_origin_is_a_consistency_violation() {
    // the node is a subgraph root in eu: no origin parent to derive from
    let fixture = Fixture::with_trees(|content| {
        let subgraph = content.subgraph_mut(&point("eu"));
        subgraph.add_root(node("root"));
        subgraph.add_child(&id("root"), node("parent-a"));
        subgraph.add_child(&id("parent-a"), node("sib-b"));
        subgraph.add_root(named_node("node", "teaser"));
    });

    assert_matches!(
        fixture.resolve(&command("eu", GatherAll).with_new_succeeding_sibling(id("sib-b"))),
        Err(MoveError::InconsistentContentGraph { .. })
    );
}
