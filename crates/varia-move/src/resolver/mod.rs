//! Resolution of a move command into per-point parent/sibling assignments.

use std::collections::BTreeMap;

use varia_space::{
    DimensionSpacePoint, DimensionSpacePointHash, DimensionSpacePointSet,
    InterDimensionalVariationGraph, OriginDimensionSpacePoint,
};

use crate::assignments::{
    MoveNodeAggregateResult, NodeMoveMapping, NodeMoveMappings, NodeVariantAssignment,
    NodeVariantAssignments,
};
use crate::command::{MoveNodeAggregate, RelationDistributionStrategy};
use crate::content_graph::{ContentGraph, ContentSubgraph, NodeAggregateSnapshot};
use crate::errors::MoveError;
use crate::node::{Node, NodeAggregateId};

#[cfg(test)]
mod tests;

/// Computes, for a move command, the affected dimension space points and the
/// new parent/sibling assignment per point.
///
/// Pure read-side computation: every query goes against the supplied content
/// graph snapshot, every decision is deterministic, and all preconditions
/// are checked before the first mapping is emitted — the result is
/// all-or-nothing.
pub struct NodeAggregateMoveResolver<'a> {
    variation_graph: &'a InterDimensionalVariationGraph,
    content_graph: &'a dyn ContentGraph,
}

impl<'a> NodeAggregateMoveResolver<'a> {
    /// Create a resolver over the given variation graph and content graph.
    pub fn new(
        variation_graph: &'a InterDimensionalVariationGraph,
        content_graph: &'a dyn ContentGraph,
    ) -> Self {
        Self {
            variation_graph,
            content_graph,
        }
    }

    /// Resolve a move command into its mappings, or reject it.
    pub fn resolve(
        &self,
        command: &MoveNodeAggregate,
    ) -> Result<MoveNodeAggregateResult, MoveError> {
        if !self
            .content_graph
            .has_content_stream(&command.content_stream_id)
        {
            return Err(MoveError::ContentStreamDoesNotExist {
                content_stream_id: command.content_stream_id.clone(),
            });
        }
        if !self
            .variation_graph
            .dimension_space_points()
            .contains(&command.dimension_space_point)
        {
            return Err(MoveError::DimensionSpace(
                varia_space::DimensionSpaceError::DimensionSpacePointNotFound {
                    point: command.dimension_space_point.clone(),
                },
            ));
        }

        let node_aggregate = self.require_node_aggregate(command, &command.node_aggregate_id)?;
        if node_aggregate.classification().is_root() {
            return Err(MoveError::NodeAggregateIsRoot {
                node_aggregate_id: command.node_aggregate_id.clone(),
            });
        }
        if node_aggregate.classification().is_tethered() {
            return Err(MoveError::NodeAggregateIsTethered {
                node_aggregate_id: command.node_aggregate_id.clone(),
            });
        }
        if !node_aggregate
            .covered_dimension_space_points()
            .contains(&command.dimension_space_point)
        {
            return Err(MoveError::NodeAggregateDoesNotCoverDimensionSpacePoint {
                node_aggregate_id: command.node_aggregate_id.clone(),
                dimension_space_point: command.dimension_space_point.clone(),
            });
        }

        let affected_points = self.resolve_affected_dimension_space_point_set(
            node_aggregate,
            command.relation_distribution_strategy,
            &command.dimension_space_point,
        )?;

        if let Some(parent_id) = &command.new_parent_node_aggregate_id {
            let new_parent = self.require_node_aggregate(command, parent_id)?;
            self.require_node_name_to_be_uncovered(command, node_aggregate, new_parent, &affected_points)?;
            for point in &affected_points {
                if !new_parent.covered_dimension_space_points().contains(point) {
                    return Err(MoveError::NodeAggregateDoesNotCoverDimensionSpacePoint {
                        node_aggregate_id: parent_id.clone(),
                        dimension_space_point: point.clone(),
                    });
                }
            }
            self.require_node_aggregate_to_not_be_descendant(command, parent_id, node_aggregate)?;
        }
        for sibling_id in [
            command.new_preceding_sibling_node_aggregate_id.as_ref(),
            command.new_succeeding_sibling_node_aggregate_id.as_ref(),
        ]
        .into_iter()
        .flatten()
        {
            let _ = self.require_node_aggregate(command, sibling_id)?;
        }

        let mut succeeding_sibling_assignments: BTreeMap<
            DimensionSpacePointHash,
            NodeVariantAssignments,
        > = BTreeMap::new();
        let mut parent_assignments: BTreeMap<DimensionSpacePointHash, NodeVariantAssignments> =
            BTreeMap::new();
        for origin in node_aggregate.occupied_dimension_space_points() {
            let siblings = self.resolve_new_succeeding_sibling_assignments(
                command,
                node_aggregate,
                &origin,
                &affected_points,
            )?;
            let parents = self.resolve_new_parent_assignments(
                command,
                node_aggregate,
                &siblings,
                &origin,
                &affected_points,
            )?;
            let _ = succeeding_sibling_assignments.insert(origin.hash().clone(), siblings);
            let _ = parent_assignments.insert(origin.hash().clone(), parents);
        }

        let mappings = Self::assemble_move_mappings(
            node_aggregate,
            &parent_assignments,
            &succeeding_sibling_assignments,
            &affected_points,
        )?;

        let is_pure_reposition = command.new_parent_node_aggregate_id.is_none()
            && command.new_preceding_sibling_node_aggregate_id.is_none()
            && command.new_succeeding_sibling_node_aggregate_id.is_none();

        tracing::debug!(
            node_aggregate_id = %command.node_aggregate_id,
            affected_point_count = affected_points.len(),
            mapping_count = mappings.len(),
            "move command resolved"
        );

        Ok(MoveNodeAggregateResult {
            node_aggregate_id: command.node_aggregate_id.clone(),
            mappings,
            repositioned_in_points: if is_pure_reposition {
                affected_points
            } else {
                DimensionSpacePointSet::empty()
            },
        })
    }

    /// Step 1: which points the move touches at all.
    fn resolve_affected_dimension_space_point_set(
        &self,
        node_aggregate: &dyn NodeAggregateSnapshot,
        strategy: RelationDistributionStrategy,
        reference: &DimensionSpacePoint,
    ) -> Result<DimensionSpacePointSet, MoveError> {
        Ok(match strategy {
            RelationDistributionStrategy::Scatter => {
                DimensionSpacePointSet::from_points([reference.clone()])
            }
            RelationDistributionStrategy::GatherSpecializations => node_aggregate
                .covered_dimension_space_points()
                .intersection(&self.variation_graph.specialization_set(reference, true, None)?),
            RelationDistributionStrategy::GatherAll => {
                node_aggregate.covered_dimension_space_points()
            }
        })
    }

    /// Step 2: the new succeeding sibling per covered point of one origin.
    ///
    /// Per target point, in order: the requested succeeding sibling in that
    /// point's view; the requested preceding sibling's immediate successor;
    /// the lockstep search over the origin's own sibling ordering. Points
    /// where nothing resolves receive no assignment (parent-only placement).
    fn resolve_new_succeeding_sibling_assignments(
        &self,
        command: &MoveNodeAggregate,
        node_aggregate: &dyn NodeAggregateSnapshot,
        origin: &OriginDimensionSpacePoint,
        affected_points: &DimensionSpacePointSet,
    ) -> Result<NodeVariantAssignments, MoveError> {
        let mut assignments = NodeVariantAssignments::create();
        let preceding_id = command.new_preceding_sibling_node_aggregate_id.as_ref();
        let succeeding_id = command.new_succeeding_sibling_node_aggregate_id.as_ref();
        if preceding_id.is_none() && succeeding_id.is_none() {
            return Ok(assignments);
        }

        let parent_constraint = command.new_parent_node_aggregate_id.as_ref();
        let origin_subgraph = self.require_subgraph(command, origin.as_point())?;

        for point in &node_aggregate
            .coverage_by_occupant(origin)
            .intersection(affected_points)
        {
            let target_subgraph = self.require_subgraph(command, point)?;

            let mut resolved = match succeeding_id {
                Some(succeeding_id) => {
                    find_sibling(target_subgraph, parent_constraint, succeeding_id)?
                }
                None => None,
            };

            if resolved.is_none() {
                let preceding_resolved = match preceding_id {
                    Some(preceding_id) => {
                        find_sibling(target_subgraph, parent_constraint, preceding_id)?
                    }
                    None => None,
                };
                resolved = match preceding_resolved {
                    Some(preceding_node) => first_other_successor(
                        target_subgraph,
                        &preceding_node.aggregate_id,
                        &command.node_aggregate_id,
                    ),
                    None => self.resolve_succeeding_sibling_from_origin_siblings(
                        &command.node_aggregate_id,
                        parent_constraint,
                        preceding_id,
                        succeeding_id,
                        target_subgraph,
                        origin_subgraph,
                    )?,
                };
            }

            if let Some(sibling) = resolved {
                tracing::trace!(
                    %point,
                    sibling_id = %sibling.aggregate_id,
                    "succeeding sibling resolved"
                );
                assignments.add(
                    NodeVariantAssignment {
                        node_aggregate_id: sibling.aggregate_id,
                        origin_dimension_space_point: sibling.origin_dimension_space_point,
                    },
                    point,
                );
            } else {
                tracing::trace!(%point, "no succeeding sibling resolvable, parent-only placement");
            }
        }

        Ok(assignments)
    }

    /// The lockstep fallback: walk the origin's preceding and succeeding
    /// sibling candidate lists at equal distances, re-resolving each
    /// candidate in the target point's view; first hit wins, the succeeding
    /// side is preferred at equal distance. The moved node itself never
    /// counts as a candidate.
    fn resolve_succeeding_sibling_from_origin_siblings(
        &self,
        moved_id: &NodeAggregateId,
        parent_constraint: Option<&NodeAggregateId>,
        preceding_id: Option<&NodeAggregateId>,
        succeeding_id: Option<&NodeAggregateId>,
        target_subgraph: &dyn ContentSubgraph,
        origin_subgraph: &dyn ContentSubgraph,
    ) -> Result<Option<Node>, MoveError> {
        let succeeding_candidates: Vec<Node> = succeeding_id
            .map(|id| origin_subgraph.find_succeeding_siblings(id, None, None))
            .unwrap_or_default()
            .into_iter()
            .filter(|candidate| candidate.aggregate_id != *moved_id)
            .collect();
        let preceding_candidates: Vec<Node> = preceding_id
            .map(|id| origin_subgraph.find_preceding_siblings(id, None, None))
            .unwrap_or_default()
            .into_iter()
            .filter(|candidate| candidate.aggregate_id != *moved_id)
            .collect();

        let maximum_distance = succeeding_candidates.len().max(preceding_candidates.len());
        for distance in 0..maximum_distance {
            if let Some(candidate) = succeeding_candidates.get(distance) {
                if let Some(sibling) =
                    find_sibling(target_subgraph, parent_constraint, &candidate.aggregate_id)?
                {
                    return Ok(Some(sibling));
                }
            }
            if let Some(candidate) = preceding_candidates.get(distance) {
                if find_sibling(target_subgraph, parent_constraint, &candidate.aggregate_id)?
                    .is_some()
                {
                    if let Some(successor) =
                        first_other_successor(target_subgraph, &candidate.aggregate_id, moved_id)
                    {
                        return Ok(Some(successor));
                    }
                }
            }
        }

        Ok(None)
    }

    /// Step 3: the new parent per covered point of one origin.
    ///
    /// An explicit parent is assigned verbatim to every affected covered
    /// point. Otherwise the parent is derived from the resolved succeeding
    /// sibling: where the sibling's actual parent differs from the origin's
    /// current parent, that parent is recorded; same-parent points need no
    /// move and are omitted.
    fn resolve_new_parent_assignments(
        &self,
        command: &MoveNodeAggregate,
        node_aggregate: &dyn NodeAggregateSnapshot,
        succeeding_sibling_assignments: &NodeVariantAssignments,
        origin: &OriginDimensionSpacePoint,
        affected_points: &DimensionSpacePointSet,
    ) -> Result<NodeVariantAssignments, MoveError> {
        let mut parents = NodeVariantAssignments::create();

        if let Some(parent_id) = &command.new_parent_node_aggregate_id {
            for point in &node_aggregate
                .coverage_by_occupant(origin)
                .intersection(affected_points)
            {
                let subgraph = self.require_subgraph(command, point)?;
                let parent_node = subgraph.find_node_by_aggregate_id(parent_id).ok_or_else(|| {
                    MoveError::InconsistentContentGraph {
                        reason: format!(
                            "new parent \"{parent_id}\" is not visible in {point} despite covering it"
                        ),
                    }
                })?;
                parents.add(
                    NodeVariantAssignment {
                        node_aggregate_id: parent_id.clone(),
                        origin_dimension_space_point: parent_node.origin_dimension_space_point,
                    },
                    point,
                );
            }
            return Ok(parents);
        }

        let origin_subgraph = self.require_subgraph(command, origin.as_point())?;
        let origin_parent = origin_subgraph
            .find_parent_node(&command.node_aggregate_id)
            .ok_or_else(|| MoveError::InconsistentContentGraph {
                reason: format!(
                    "no parent found for \"{}\" in its own origin {origin}",
                    command.node_aggregate_id
                ),
            })?;

        for (covered_hash, sibling_assignment) in succeeding_sibling_assignments.iter() {
            let Some(point) = affected_points.get(covered_hash) else {
                continue;
            };
            let subgraph = self.require_subgraph(command, point)?;
            let parent_node = subgraph
                .find_parent_node(&sibling_assignment.node_aggregate_id)
                .ok_or_else(|| MoveError::InconsistentContentGraph {
                    reason: format!(
                        "no parent found for succeeding sibling \"{}\" in {point}",
                        sibling_assignment.node_aggregate_id
                    ),
                })?;
            if parent_node.aggregate_id != origin_parent.aggregate_id {
                parents.add(
                    NodeVariantAssignment {
                        node_aggregate_id: parent_node.aggregate_id,
                        origin_dimension_space_point: parent_node.origin_dimension_space_point,
                    },
                    point,
                );
            }
        }

        Ok(parents)
    }

    /// Step 4: one mapping per occupied origin that occupies an affected
    /// covered point.
    fn assemble_move_mappings(
        node_aggregate: &dyn NodeAggregateSnapshot,
        parent_assignments: &BTreeMap<DimensionSpacePointHash, NodeVariantAssignments>,
        succeeding_sibling_assignments: &BTreeMap<DimensionSpacePointHash, NodeVariantAssignments>,
        affected_points: &DimensionSpacePointSet,
    ) -> Result<NodeMoveMappings, MoveError> {
        let mut mappings: BTreeMap<DimensionSpacePointHash, NodeMoveMapping> = BTreeMap::new();
        let covered_affected = node_aggregate
            .covered_dimension_space_points()
            .intersection(affected_points);

        for covered in &covered_affected {
            let origin = node_aggregate.occupation_by_covered(covered).ok_or_else(|| {
                MoveError::InconsistentContentGraph {
                    reason: format!(
                        "covered point {covered} has no occupying origin in aggregate \"{}\"",
                        node_aggregate.id()
                    ),
                }
            })?;
            if mappings.contains_key(origin.hash()) {
                continue;
            }
            let mapping = NodeMoveMapping {
                new_parent_assignments: parent_assignments
                    .get(origin.hash())
                    .cloned()
                    .unwrap_or_default(),
                new_succeeding_sibling_assignments: succeeding_sibling_assignments
                    .get(origin.hash())
                    .cloned()
                    .unwrap_or_default(),
                moved_node_origin: origin.clone(),
            };
            let _ = mappings.insert(origin.hash().clone(), mapping);
        }

        Ok(NodeMoveMappings::from_mappings(mappings))
    }

    fn require_node_aggregate(
        &self,
        command: &MoveNodeAggregate,
        node_aggregate_id: &NodeAggregateId,
    ) -> Result<&'a dyn NodeAggregateSnapshot, MoveError> {
        self.content_graph
            .find_node_aggregate_by_id(&command.content_stream_id, node_aggregate_id)
            .ok_or_else(|| MoveError::NodeAggregateCurrentlyDoesNotExist {
                node_aggregate_id: node_aggregate_id.clone(),
            })
    }

    fn require_subgraph(
        &self,
        command: &MoveNodeAggregate,
        point: &DimensionSpacePoint,
    ) -> Result<&'a dyn ContentSubgraph, MoveError> {
        self.content_graph
            .subgraph(&command.content_stream_id, point)
            .ok_or_else(|| MoveError::InconsistentContentGraph {
                reason: format!("no subgraph projected for dimension space point {point}"),
            })
    }

    /// The moved node's name must not already be taken by another child of
    /// the new parent anywhere in the affected points.
    fn require_node_name_to_be_uncovered(
        &self,
        command: &MoveNodeAggregate,
        node_aggregate: &dyn NodeAggregateSnapshot,
        new_parent: &dyn NodeAggregateSnapshot,
        affected_points: &DimensionSpacePointSet,
    ) -> Result<(), MoveError> {
        let Some(node_name) = node_aggregate.node_name() else {
            return Ok(());
        };
        for child in self
            .content_graph
            .find_child_node_aggregates(&command.content_stream_id, new_parent.id())
        {
            if child.id() == node_aggregate.id() {
                continue;
            }
            if child.node_name() == Some(node_name)
                && !child
                    .covered_dimension_space_points()
                    .intersection(affected_points)
                    .is_empty()
            {
                return Err(MoveError::NodeNameIsAlreadyCovered {
                    node_name: node_name.clone(),
                    parent_node_aggregate_id: new_parent.id().clone(),
                });
            }
        }
        Ok(())
    }

    /// Cycle prevention: the new parent must not sit below the moved node.
    fn require_node_aggregate_to_not_be_descendant(
        &self,
        command: &MoveNodeAggregate,
        new_parent_id: &NodeAggregateId,
        node_aggregate: &dyn NodeAggregateSnapshot,
    ) -> Result<(), MoveError> {
        if new_parent_id == node_aggregate.id() {
            return Err(MoveError::NodeAggregateIsDescendant {
                node_aggregate_id: new_parent_id.clone(),
                ancestor_id: node_aggregate.id().clone(),
            });
        }
        for child in self
            .content_graph
            .find_child_node_aggregates(&command.content_stream_id, node_aggregate.id())
        {
            self.require_node_aggregate_to_not_be_descendant(command, new_parent_id, child)?;
        }
        Ok(())
    }
}

/// Resolve a sibling candidate in one subgraph.
///
/// With a parent constraint, the candidate only counts if its actual parent
/// is that aggregate; a candidate without any parent in a subgraph that
/// shows it is a projection inconsistency.
fn find_sibling(
    subgraph: &dyn ContentSubgraph,
    parent_constraint: Option<&NodeAggregateId>,
    sibling_id: &NodeAggregateId,
) -> Result<Option<Node>, MoveError> {
    let Some(candidate) = subgraph.find_node_by_aggregate_id(sibling_id) else {
        return Ok(None);
    };
    match parent_constraint {
        None => Ok(Some(candidate)),
        Some(parent_id) => {
            let parent = subgraph.find_parent_node(sibling_id).ok_or_else(|| {
                MoveError::InconsistentContentGraph {
                    reason: format!("sibling \"{sibling_id}\" has no parent in its subgraph"),
                }
            })?;
            Ok((parent.aggregate_id == *parent_id).then_some(candidate))
        }
    }
}

/// The first succeeding sibling of `node_id` that is not the moved node.
///
/// Two are fetched because the nearest successor might be the moved node
/// itself.
fn first_other_successor(
    subgraph: &dyn ContentSubgraph,
    node_id: &NodeAggregateId,
    moved_id: &NodeAggregateId,
) -> Option<Node> {
    subgraph
        .find_succeeding_siblings(node_id, None, Some(2))
        .into_iter()
        .find(|sibling| sibling.aggregate_id != *moved_id)
}
