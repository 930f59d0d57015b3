//! Schema types

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field wire name -> type display name.
///
/// Keys are kept sorted so serialized output is reproducible.
pub type FieldMap = BTreeMap<String, String>;

/// Request and response shapes of one operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationShape {
    /// Flattened request type, `None` when no qualifying parameter exists
    #[serde(rename = "requestParameters")]
    pub request: Option<FieldMap>,

    /// Flattened response type, `None` when no qualifying return exists
    #[serde(rename = "responseElements")]
    pub response: Option<FieldMap>,
}

impl OperationShape {
    /// Whether neither side was found
    pub fn is_empty(&self) -> bool {
        self.request.is_none() && self.response.is_none()
    }
}

/// Operation name -> shape for one client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    operations: BTreeMap<String, OperationShape>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a shape, returning the previous one under the same name
    pub fn insert(
        &mut self,
        operation: impl Into<String>,
        shape: OperationShape,
    ) -> Option<OperationShape> {
        self.operations.insert(operation.into(), shape)
    }

    /// Get the shape of an operation
    pub fn get(&self, operation: &str) -> Option<&OperationShape> {
        self.operations.get(operation)
    }

    /// Whether the catalog has an entry for an operation
    pub fn contains(&self, operation: &str) -> bool {
        self.operations.contains_key(operation)
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operation names in sorted order
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Iterate over operations in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OperationShape)> {
        self.operations
            .iter()
            .map(|(name, shape)| (name.as_str(), shape))
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Convert to indented JSON string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
