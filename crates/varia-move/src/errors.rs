//! Error types for move resolution.

use varia_space::{DimensionSpacePoint, DimensionSpaceError};

use crate::node::{ContentStreamId, NodeAggregateId, NodeName};

/// An empty string was used where a branded identifier is required.
#[derive(Debug, thiserror::Error)]
#[error("{kind} must not be empty")]
pub struct IdentityIsInvalid {
    /// Which identifier type rejected the input.
    pub kind: &'static str,
}

/// Why a move command was rejected.
///
/// Every variant is detected before any mapping is emitted; a rejected
/// command leaves no partial result behind.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// The addressed content stream does not exist.
    #[error("content stream \"{content_stream_id}\" does not exist yet")]
    ContentStreamDoesNotExist {
        /// The missing stream.
        content_stream_id: ContentStreamId,
    },

    /// The reference point lies outside the allowed dimension subspace.
    #[error(transparent)]
    DimensionSpace(#[from] DimensionSpaceError),

    /// The addressed node aggregate is not present in the content graph.
    #[error("node aggregate \"{node_aggregate_id}\" does currently not exist")]
    NodeAggregateCurrentlyDoesNotExist {
        /// The missing aggregate.
        node_aggregate_id: NodeAggregateId,
    },

    /// Root node aggregates cannot be moved.
    #[error("node aggregate \"{node_aggregate_id}\" is a root and cannot be moved")]
    NodeAggregateIsRoot {
        /// The root aggregate.
        node_aggregate_id: NodeAggregateId,
    },

    /// Tethered (auto-created) node aggregates cannot be moved.
    #[error("node aggregate \"{node_aggregate_id}\" is tethered and cannot be moved")]
    NodeAggregateIsTethered {
        /// The tethered aggregate.
        node_aggregate_id: NodeAggregateId,
    },

    /// A node aggregate does not cover a required dimension space point.
    #[error(
        "node aggregate \"{node_aggregate_id}\" does not cover \
         dimension space point {dimension_space_point}"
    )]
    NodeAggregateDoesNotCoverDimensionSpacePoint {
        /// The aggregate with insufficient coverage.
        node_aggregate_id: NodeAggregateId,
        /// The uncovered point.
        dimension_space_point: DimensionSpacePoint,
    },

    /// The new parent is a descendant of the node being moved.
    #[error(
        "node aggregate \"{node_aggregate_id}\" is a descendant of \
         node aggregate \"{ancestor_id}\""
    )]
    NodeAggregateIsDescendant {
        /// The descendant (the requested new parent).
        node_aggregate_id: NodeAggregateId,
        /// The ancestor (the node being moved).
        ancestor_id: NodeAggregateId,
    },

    /// The moved node's name is already taken under the new parent.
    #[error(
        "node name \"{node_name}\" is already covered under \
         parent node aggregate \"{parent_node_aggregate_id}\""
    )]
    NodeNameIsAlreadyCovered {
        /// The colliding name.
        node_name: NodeName,
        /// The parent the name is taken under.
        parent_node_aggregate_id: NodeAggregateId,
    },

    /// A serialized relation distribution strategy was not recognized.
    #[error("unknown relation distribution strategy \"{0}\"")]
    UnknownRelationDistributionStrategy(String),

    /// The content graph contradicted itself while resolving the move.
    ///
    /// Raised when a parent or sibling cannot be resolved in a subgraph that
    /// must contain it. Not recoverable by the caller.
    #[error("inconsistent content graph: {reason}")]
    InconsistentContentGraph {
        /// What the projection failed to answer.
        reason: String,
    },
}
