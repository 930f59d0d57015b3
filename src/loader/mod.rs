//! Descriptor loader module
//!
//! Parse client descriptors from JSON or YAML files.
//!
//! # Overview
//!
//! The loader is the data-driven counterpart of the source scanner: a
//! descriptor file lists operations and their parameter and return types
//! directly, so clients that are not Rust sources can still be cataloged.

mod parser;
mod types;

pub use parser::{load_descriptor, load_descriptor_from_str};
pub use types::DescriptorFormat;

#[cfg(test)]
mod tests;
