//! CLI module
//!
//! Command-line interface for building operation catalogs.
//!
//! # Commands
//!
//! - `scan` - Build and write catalogs for configured services
//! - `inspect` - Build one catalog and print it
//! - `services` - List configured services
//! - `validate` - Validate the run configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
