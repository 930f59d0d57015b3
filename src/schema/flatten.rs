//! Composite type flattening

use super::types::FieldMap;
use crate::config::DEFAULT_SKIP_FIELDS;
use crate::descriptor::CompositeType;
use std::collections::BTreeSet;

/// Flattens one composite type into a field map, one level deep
#[derive(Debug, Clone)]
pub struct FieldFlattener {
    /// Raw field names that are never emitted
    skip_fields: BTreeSet<String>,
}

impl Default for FieldFlattener {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_FIELDS.iter().copied())
    }
}

impl FieldFlattener {
    /// Create a flattener with the given skip-list
    pub fn new<I, S>(skip_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip_fields: skip_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a raw field name is on the skip-list
    pub fn is_skipped(&self, raw_name: &str) -> bool {
        self.skip_fields.contains(raw_name)
    }

    /// Flatten a composite type.
    ///
    /// Keys are wire names (alias when declared, raw name otherwise); values
    /// are type display strings. Fields are visited in declaration order, so
    /// two fields sharing a wire name keep the later one.
    pub fn flatten(&self, composite: &CompositeType) -> FieldMap {
        let mut fields = FieldMap::new();

        for field in &composite.fields {
            if field.skip || self.is_skipped(&field.name) {
                continue;
            }
            fields.insert(field.wire_name().to_string(), field.type_name.clone());
        }

        fields
    }
}
