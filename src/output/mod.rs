//! Output module
//!
//! Serializes catalogs to JSON files.
//!
//! # Overview
//!
//! Each service gets one file named `<prefix><service>_operations.json`
//! holding the catalog as indented JSON. Absent request or response sides
//! render as `null`.

mod writer;

pub use writer::{CatalogWriter, FILE_SUFFIX};
