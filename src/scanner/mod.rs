//! Source scanner module
//!
//! Static introspection of Rust client crates. Sources are parsed with `syn`;
//! nothing is compiled or executed.
//!
//! # Overview
//!
//! - Public methods of inherent `impl <Client>` blocks become operations
//! - `Result<T, E>` returns split into a payload and an error channel
//! - Structs become composite types, honoring `#[serde(rename)]`,
//!   `#[serde(rename_all)]` and `#[serde(skip)]`

mod attrs;
mod render;
mod source;

pub use render::render_type;
pub use source::{scan_client, SourceScanner};
