//! Common types used throughout opcatalog
//!
//! Shared policy enums consumed by both the configuration layer and the
//! catalog builder.

use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};

// ============================================================================
// Multi-Candidate Policy
// ============================================================================

/// What to do when an operation has more than one qualifying composite on
/// the same side (request or response)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiCandidatePolicy {
    /// Keep the last examined candidate
    #[default]
    LastWins,
    /// Fail the build for that client
    Reject,
}

// ============================================================================
// Operation Naming
// ============================================================================

/// How operation names are keyed in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationNaming {
    /// Use the method name exactly as declared
    #[default]
    AsDeclared,
    /// Convert to PascalCase (`get_widget` -> `GetWidget`)
    Pascal,
}

impl OperationNaming {
    /// Apply the naming convention to a declared method name
    pub fn apply(self, name: &str) -> String {
        match self {
            OperationNaming::AsDeclared => name.to_string(),
            OperationNaming::Pascal => name.to_upper_camel_case(),
        }
    }
}
