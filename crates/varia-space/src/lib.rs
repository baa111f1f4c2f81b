//! # varia-space
//!
//! Dimension space points, the allowed subspace, and the inter-dimensional
//! variation graph.
//!
//! Built on top of `varia-dimension`, this crate materializes the legal
//! combinatorial space of dimension values and the generalization/
//! specialization relation over it:
//!
//! - **Points**: [`DimensionSpacePoint`] / [`OriginDimensionSpacePoint`] as
//!   canonically hashed coordinate tuples, [`DimensionSpacePointSet`] for
//!   hash-indexed set algebra
//! - **Weighted points**: [`WeightedDimensionSpacePoint`] carrying each
//!   coordinate's specialization depth, with positional weight normalization
//! - **Subspace**: [`ContentDimensionZookeeper`], the constraint-pruned
//!   Cartesian product of all dimension values
//! - **Graph**: [`InterDimensionalVariationGraph`] answering generalization,
//!   specialization, primary-generalization, and variant-type queries
//!
//! ## Lifecycle
//!
//! The graph is built once per dimension configuration and is immutable
//! afterwards; share it read-only (`Send + Sync`) and pass it explicitly to
//! consumers such as the move resolver in `varia-move`.

#![deny(unsafe_code)]

pub mod errors;
pub mod graph;
pub mod point;
pub mod point_set;
pub mod weighted;
pub mod zookeeper;

pub use errors::DimensionSpaceError;
pub use graph::{InterDimensionalVariationGraph, VariantType};
pub use point::{DimensionSpacePoint, DimensionSpacePointHash, OriginDimensionSpacePoint};
pub use point_set::DimensionSpacePointSet;
pub use weighted::{DimensionSpacePointWeight, WeightIdentityHash, WeightedDimensionSpacePoint};
pub use zookeeper::{ContentDimensionZookeeper, DimensionValueCombination};
