//! Operation schema module
//!
//! Derives the request/response field catalog of a client from its
//! descriptor.
//!
//! # Overview
//!
//! - `FieldFlattener` - Flattens one composite type into a `FieldMap`
//! - `OperationShapeExtractor` - Classifies an operation's parameter and
//!   return types and picks the request/response shapes
//! - `TypeCatalogBuilder` - Builds the operation -> shape `Catalog`
//!
//! Everything here is a pure, synchronous function of the descriptor:
//! building the same descriptor twice yields identical catalogs.

mod builder;
mod extract;
mod flatten;
mod types;

pub use builder::{build_catalog, TypeCatalogBuilder};
pub use extract::{Extraction, OperationShapeExtractor};
pub use flatten::FieldFlattener;
pub use types::{Catalog, FieldMap, OperationShape};
