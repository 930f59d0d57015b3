//! Client descriptor module
//!
//! Owned, serializable descriptions of a client's method surface. These stand
//! in for run-time type metadata: they are produced statically, either by the
//! source scanner or by loading a registry file, and then handed to the
//! catalog builder.
//!
//! # Overview
//!
//! - `ClientDescriptor` - A client and its operations
//! - `OperationDescriptor` - One method with parameter and return types
//! - `TypeDescriptor` - A named, composite or indirection type with a role tag
//! - `FieldDescriptor` - One field of a composite type

mod types;

pub use types::{
    ClientDescriptor, CompositeType, FieldDescriptor, OperationDescriptor, TypeDescriptor,
    TypeKind, TypeRole,
};
