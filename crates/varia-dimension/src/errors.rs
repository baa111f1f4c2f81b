//! Error types for the dimension model.

use std::path::PathBuf;

/// Errors raised while constructing or querying content dimensions.
///
/// All variants except [`DimensionError::GeneralizationIsInvalid`] are
/// configuration errors: they reject the dimension setup at startup.
/// `GeneralizationIsInvalid` doubles as the "not an ancestor" signal of
/// [`ContentDimension::calculate_specialization_depth`](crate::ContentDimension::calculate_specialization_depth).
#[derive(Debug, thiserror::Error)]
pub enum DimensionError {
    /// A content dimension identifier was empty.
    #[error("content dimension identifiers must not be empty")]
    IdentifierIsInvalid,

    /// A content dimension value was empty.
    #[error("content dimension values must not be empty")]
    ValueIsInvalid,

    /// A specialization depth was negative.
    #[error("specialization depths must not be negative, got {depth}")]
    SpecializationDepthIsInvalid {
        /// The rejected depth.
        depth: i64,
    },

    /// A dimension was declared without any values.
    #[error("content dimension \"{dimension_id}\" must have at least one value")]
    ValuesAreMissing {
        /// The dimension missing its values.
        dimension_id: String,
    },

    /// A dimension's default value is not among its declared values.
    #[error(
        "content dimension \"{dimension_id}\" declares default value \"{default_value}\" \
         which is not among its values"
    )]
    DefaultValueIsMissing {
        /// The dimension with the dangling default.
        dimension_id: String,
        /// The default value that could not be found.
        default_value: String,
    },

    /// A generalization edge referenced a value that does not exist, gave a
    /// value more than one generalization, or formed a cycle.
    #[error("content dimension \"{dimension_id}\" has an invalid variation edge: {reason}")]
    VariationEdgeIsInvalid {
        /// The dimension carrying the bad edge.
        dimension_id: String,
        /// What exactly is wrong with the edge.
        reason: String,
    },

    /// One value is not a generalization of another.
    ///
    /// Raised by depth calculation when the upward walk from the
    /// specialization reaches a root without passing the candidate.
    #[error(
        "\"{generalization}\" is not a generalization of \"{specialization}\" \
         in content dimension \"{dimension_id}\""
    )]
    GeneralizationIsInvalid {
        /// The dimension the walk happened in.
        dimension_id: String,
        /// The value the walk started from.
        specialization: String,
        /// The candidate that was not found on the walk.
        generalization: String,
    },
}

/// Errors raised while loading dimension configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The configuration file could not be read.
    #[error("failed to read dimension configuration at {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration was not valid JSON.
    #[error("failed to parse dimension configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration tree had an unexpected shape.
    #[error("malformed configuration for content dimension \"{dimension_id}\": {reason}")]
    Malformed {
        /// The dimension whose configuration is malformed.
        dimension_id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The parsed configuration violated a dimension invariant.
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}
