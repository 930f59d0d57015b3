//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Operation catalog generator
#[derive(Parser, Debug)]
#[command(name = "opcatalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and write catalogs for the configured services
    Scan {
        /// Services to catalog (comma-separated, empty = all)
        #[arg(long, value_delimiter = ',')]
        services: Vec<String>,

        /// Override the configured output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Build a single catalog and print it to stdout
    Inspect {
        /// Rust source files or directories to scan
        #[arg(long, num_args = 1.., requires = "client")]
        source: Vec<PathBuf>,

        /// Client type to look for in the sources
        #[arg(long)]
        client: Option<String>,

        /// Descriptor file (JSON or YAML) instead of sources
        #[arg(long, conflicts_with_all = ["source", "client"])]
        descriptor: Option<PathBuf>,

        /// Convert operation names to PascalCase
        #[arg(long)]
        pascal: bool,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List configured services and their sources
    Services,

    /// Validate the run configuration
    Validate,
}

/// Output format for reports and listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}
