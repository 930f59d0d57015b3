// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # opcatalog
//!
//! Builds a machine-readable catalog of a service client's operations:
//! for every operation, the flattened field map of its request payload and
//! of its response payload.
//!
//! ## Features
//!
//! - **Static Introspection**: Scan Rust client sources with `syn`, no code is run
//! - **Descriptor Registry**: Load client surfaces from JSON or YAML files
//! - **Infrastructure Filtering**: Client handles, contexts, options and errors never count as payload
//! - **Serialization Aliases**: Field maps use wire names (`serde(rename)`, `rename_all`)
//! - **Deterministic Output**: Sorted keys, one indented JSON file per service
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use opcatalog::{build_catalog, scan_client, IntrospectionConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let client = scan_client("WidgetClient", &["sdk/widgets/src".into()])?;
//!     let catalog = build_catalog(&client, &IntrospectionConfig::default())?;
//!     println!("{}", catalog.to_json_pretty()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ SourceScanner│   │    Loader    │   ClientDescriptor
//! │  (syn, heck) │   │ (json, yaml) │ ─────────────────┐
//! └──────────────┘   └──────────────┘                  │
//!                                                      ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │ TypeCatalogBuilder                                       │
//! │   OperationShapeExtractor → FieldFlattener → Catalog     │
//! └──────────────────────────────────────────────────────────┘
//!                                │
//!                  CatalogWriter (<prefix><service>_operations.json)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Run and introspection configuration
pub mod config;

/// Serializable descriptions of client method surfaces
pub mod descriptor;

/// Field flattening, shape extraction and catalog building
pub mod schema;

/// Rust source scanning
pub mod scanner;

/// JSON/YAML descriptor loader
pub mod loader;

/// Catalog file output
pub mod output;

/// Multi-service driver
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{CatalogConfig, ClientSettings, IntrospectionConfig, ServiceConfig};
pub use descriptor::ClientDescriptor;
pub use engine::{CatalogEngine, ServiceReport};
pub use loader::load_descriptor;
pub use output::CatalogWriter;
pub use scanner::{scan_client, SourceScanner};
pub use schema::{build_catalog, Catalog, FieldMap, OperationShape, TypeCatalogBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
