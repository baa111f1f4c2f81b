//! # varia-move
//!
//! Node aggregate move resolution across the dimension space.
//!
//! A content node is visible in many dimension space points at once; moving
//! it means deciding, per point, who its new parent and succeeding sibling
//! are — consistently and deterministically, with fallbacks where the
//! requested siblings do not exist in a point's view of the tree.
//!
//! - **Identity**: [`NodeAggregateId`], [`ContentStreamId`], [`NodeName`],
//!   [`NodeTypeName`] as branded newtypes
//! - **Oracles**: [`ContentGraph`] / [`ContentSubgraph`] /
//!   [`NodeAggregateSnapshot`] — the read-only seam to the projected content
//!   graph
//! - **Command**: [`MoveNodeAggregate`] with its
//!   [`RelationDistributionStrategy`]
//! - **Resolver**: [`NodeAggregateMoveResolver`], turning a command into
//!   [`NodeMoveMappings`] or a typed rejection ([`MoveError`])
//! - **Test support**: [`testutil`] with an in-memory content graph
//!
//! The resolver consumes the variation graph from `varia-space`; pass it in
//! explicitly, it is never global state.

#![deny(unsafe_code)]

pub mod assignments;
pub mod command;
pub mod content_graph;
pub mod errors;
pub mod node;
pub mod resolver;
pub mod testutil;

pub use assignments::{
    MoveNodeAggregateResult, NodeMoveMapping, NodeMoveMappings, NodeVariantAssignment,
    NodeVariantAssignments,
};
pub use command::{MoveNodeAggregate, RelationDistributionStrategy};
pub use content_graph::{ContentGraph, ContentSubgraph, NodeAggregateSnapshot};
pub use errors::{IdentityIsInvalid, MoveError};
pub use node::{
    ContentStreamId, Node, NodeAggregateClassification, NodeAggregateId, NodeName, NodeTypeName,
};
pub use resolver::NodeAggregateMoveResolver;
