//! Descriptor types
//!
//! Serializable type metadata for a client's method surface.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Type Role
// ============================================================================

/// Structural category of a type in an operation signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRole {
    /// Not tagged; classification falls back to display-name markers
    #[default]
    Unspecified,
    /// Carries request or response data
    Payload,
    /// The client handle itself (receiver)
    ClientHandle,
    /// Cancellation / context carrier
    Context,
    /// Per-call options bag
    CallOptions,
    /// Error channel
    Error,
}

impl TypeRole {
    /// Whether the role is tagged at all
    pub fn is_unspecified(&self) -> bool {
        matches!(self, TypeRole::Unspecified)
    }

    /// Whether the role carries no payload data
    pub fn is_infrastructure(self) -> bool {
        matches!(
            self,
            TypeRole::ClientHandle | TypeRole::Context | TypeRole::CallOptions | TypeRole::Error
        )
    }
}

// ============================================================================
// Fields and Composite Types
// ============================================================================

/// One declared field of a composite type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Raw (in-memory) field name
    pub name: String,
    /// Declared wire-format name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Display string of the field's type
    #[serde(rename = "type")]
    pub type_name: String,
    /// Field never reaches the wire
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldDescriptor {
    /// Create a field without an alias
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            type_name: type_name.into(),
            skip: false,
        }
    }

    /// Set the serialization alias
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Mark the field as never serialized
    #[must_use]
    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Name the field carries on the wire.
    ///
    /// Tag options after a comma (`size,omitempty`) are not part of the name.
    /// An empty alias falls back to the raw name.
    pub fn wire_name(&self) -> &str {
        self.alias
            .as_deref()
            .map(|alias| alias.split(',').next().unwrap_or_default().trim())
            .filter(|alias| !alias.is_empty())
            .unwrap_or(&self.name)
    }
}

/// A record type with declared fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeType {
    /// Type name
    pub name: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl CompositeType {
    /// Create a composite type
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

// ============================================================================
// Type Descriptors
// ============================================================================

/// Shape of a type as seen in an operation signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    /// Opaque or scalar type
    Named { name: String },
    /// Record type with fields
    Composite(CompositeType),
    /// Reference or owning pointer to another type
    Pointer { target: Box<TypeDescriptor> },
    /// Optional wrapper around another type
    Optional { target: Box<TypeDescriptor> },
}

/// A type appearing as a parameter or return value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Structural kind
    #[serde(flatten)]
    pub kind: TypeKind,
    /// Capability tag
    #[serde(default, skip_serializing_if = "TypeRole::is_unspecified")]
    pub role: TypeRole,
    /// Display name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl TypeDescriptor {
    fn from_kind(kind: TypeKind) -> Self {
        Self {
            kind,
            role: TypeRole::Unspecified,
            display: None,
        }
    }

    /// Create an opaque named type
    pub fn named(name: impl Into<String>) -> Self {
        Self::from_kind(TypeKind::Named { name: name.into() })
    }

    /// Create a composite type
    pub fn composite(composite: CompositeType) -> Self {
        Self::from_kind(TypeKind::Composite(composite))
    }

    /// Create a pointer to another type
    pub fn pointer(target: TypeDescriptor) -> Self {
        Self::from_kind(TypeKind::Pointer {
            target: Box::new(target),
        })
    }

    /// Create an optional wrapper around another type
    pub fn optional(target: TypeDescriptor) -> Self {
        Self::from_kind(TypeKind::Optional {
            target: Box::new(target),
        })
    }

    /// Set the role tag
    #[must_use]
    pub fn with_role(mut self, role: TypeRole) -> Self {
        self.role = role;
        self
    }

    /// Override the display name
    #[must_use]
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Human-readable type name used for marker matching and documentation
    pub fn display_name(&self) -> String {
        if let Some(display) = &self.display {
            return display.clone();
        }
        match &self.kind {
            TypeKind::Named { name } => name.clone(),
            TypeKind::Composite(composite) => composite.name.clone(),
            TypeKind::Pointer { target } => format!("&{}", target.display_name()),
            TypeKind::Optional { target } => format!("Option<{}>", target.display_name()),
        }
    }

    /// The composite type behind any number of pointer/optional layers
    pub fn composite_target(&self) -> Option<&CompositeType> {
        match &self.kind {
            TypeKind::Composite(composite) => Some(composite),
            TypeKind::Pointer { target } | TypeKind::Optional { target } => {
                target.composite_target()
            }
            TypeKind::Named { .. } => None,
        }
    }
}

// ============================================================================
// Operations and Clients
// ============================================================================

/// One method on a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Method name, unique within the client
    pub name: String,
    /// Parameter types in order
    #[serde(default)]
    pub params: Vec<TypeDescriptor>,
    /// Return types in order
    #[serde(default)]
    pub returns: Vec<TypeDescriptor>,
}

impl OperationDescriptor {
    /// Create an operation with no parameters or returns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: Vec::new(),
        }
    }

    /// Append a parameter type
    #[must_use]
    pub fn param(mut self, ty: TypeDescriptor) -> Self {
        self.params.push(ty);
        self
    }

    /// Append a return type
    #[must_use]
    pub fn returns(mut self, ty: TypeDescriptor) -> Self {
        self.returns.push(ty);
        self
    }
}

/// The full method surface of one service client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDescriptor {
    /// Client type name
    pub name: String,
    /// Operations in the order they were reported
    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,
}

impl ClientDescriptor {
    /// Create a client with no operations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    /// Append an operation
    #[must_use]
    pub fn operation(mut self, op: OperationDescriptor) -> Self {
        self.operations.push(op);
        self
    }

    /// Check that the descriptor is usable for a catalog build
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_client(
                "<unnamed>",
                "client name cannot be empty",
            ));
        }

        let mut seen = HashSet::new();
        for op in &self.operations {
            if op.name.trim().is_empty() {
                return Err(Error::invalid_client(
                    &self.name,
                    "operation name cannot be empty",
                ));
            }
            if !seen.insert(op.name.as_str()) {
                return Err(Error::invalid_client(
                    &self.name,
                    format!("duplicate operation '{}'", op.name),
                ));
            }
        }

        Ok(())
    }
}
