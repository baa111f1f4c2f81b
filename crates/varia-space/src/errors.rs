//! Error types for dimension space queries.

use varia_dimension::ContentDimensionId;

use crate::point::DimensionSpacePoint;

/// Errors raised by dimension space and variation graph queries.
#[derive(Debug, thiserror::Error)]
pub enum DimensionSpaceError {
    /// A query was rooted at a point outside the allowed dimension subspace.
    #[error("dimension space point {point} was not found in the allowed dimension subspace")]
    DimensionSpacePointNotFound {
        /// The offending point.
        point: DimensionSpacePoint,
    },

    /// A coordinate named a value that does not exist in its dimension.
    #[error("value \"{value}\" does not belong to content dimension \"{dimension_id}\"")]
    ValueDoesNotBelongToDimension {
        /// The dimension the value was resolved against.
        dimension_id: ContentDimensionId,
        /// The unknown value.
        value: String,
    },

    /// A coordinate named a dimension that is not configured.
    #[error("content dimension \"{dimension_id}\" is not configured")]
    DimensionIsNotConfigured {
        /// The unknown dimension.
        dimension_id: ContentDimensionId,
    },
}
