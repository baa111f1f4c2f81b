//! # varia-dimension
//!
//! Content dimension model for the variation engine.
//!
//! A content dimension is one named axis of content variation (market,
//! language, …) with a forest of values connected by generalization edges:
//! a value without content in some variant falls back to its generalization.
//! This crate provides:
//!
//! - **Identifiers**: [`ContentDimensionId`] as a non-empty branded newtype
//! - **Values**: [`ContentDimensionValue`] with its
//!   [`ContentDimensionValueSpecializationDepth`] and arbitrary configuration
//! - **Constraints**: [`ContentDimensionConstraints`] /
//!   [`ContentDimensionConstraintSet`] restricting cross-dimension
//!   combinations via wildcard plus per-value overrides
//! - **Dimensions**: [`ContentDimension`], an arena-backed value forest with
//!   depth calculation and forest queries
//! - **Sources**: the [`ContentDimensionSource`] trait and the
//!   configuration-driven [`ConfigurationBasedContentDimensionSource`]
//! - **Errors**: [`DimensionError`] and [`ConfigurationError`] via `thiserror`
//! - **Logging**: [`logging::init_tracing`] for binaries and tests
//!
//! ## Crate position
//!
//! Foundation crate of the variation engine; `varia-space` builds the
//! dimension space and variation graph on top of it.

#![deny(unsafe_code)]

pub mod constraints;
pub mod dimension;
pub mod errors;
pub mod identifier;
pub mod logging;
pub mod source;
pub mod value;

pub use constraints::{ContentDimensionConstraintSet, ContentDimensionConstraints};
pub use dimension::{ContentDimension, ContentDimensionValueVariationEdge};
pub use errors::{ConfigurationError, DimensionError};
pub use identifier::ContentDimensionId;
pub use source::{ConfigurationBasedContentDimensionSource, ContentDimensionSource};
pub use value::{ContentDimensionValue, ContentDimensionValueSpecializationDepth};
