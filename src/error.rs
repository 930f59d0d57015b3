//! Error types for opcatalog
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::path::Path;
use thiserror::Error;

/// The main error type for opcatalog
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Descriptor Errors
    // ============================================================================
    #[error("Failed to read source '{path}': {message}")]
    Source { path: String, message: String },

    #[error("Client type '{client}' not found in scanned sources")]
    ClientNotFound { client: String },

    #[error("Invalid client descriptor '{client}': {message}")]
    InvalidClient { client: String, message: String },

    #[error("Operation '{operation}' has {count} {side} candidates")]
    AmbiguousOperation {
        operation: String,
        side: String,
        count: usize,
    },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Output error: {message}")]
    Output { message: String },

    #[error("Background task failed: {message}")]
    Task { message: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a source error for a file path
    pub fn source_error(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Source {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    /// Create a client-not-found error
    pub fn client_not_found(client: impl Into<String>) -> Self {
        Self::ClientNotFound {
            client: client.into(),
        }
    }

    /// Create an invalid client descriptor error
    pub fn invalid_client(client: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidClient {
            client: client.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Whether this error means no catalog could be derived at all.
    ///
    /// Write failures are not fatal: the catalog existed, only its file is
    /// missing.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Output { .. })
    }
}

/// Result type alias for opcatalog
pub type Result<T> = std::result::Result<T, Error>;
