//! Branded identifier for content dimensions.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::DimensionError;

/// Identifier of a content dimension, e.g. `"market"` or `"language"`.
///
/// Interned (`Arc<str>`) so dimension space points can carry it cheaply.
/// Guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentDimensionId(Arc<str>);

impl ContentDimensionId {
    /// Create a dimension identifier, rejecting empty strings.
    pub fn new(id: impl AsRef<str>) -> Result<Self, DimensionError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(DimensionError::IdentifierIsInvalid);
        }
        Ok(Self(Arc::from(id)))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentDimensionId {
    type Error = DimensionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ContentDimensionId {
    type Error = DimensionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentDimensionId> for String {
    fn from(id: ContentDimensionId) -> Self {
        id.0.to_string()
    }
}

impl AsRef<str> for ContentDimensionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
