//! Engine types

use serde::Serialize;
use std::path::PathBuf;

/// Outcome of cataloging one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceReport {
    /// Service name
    pub service: String,
    /// Number of operations in the catalog (0 when it could not be built)
    pub operations: usize,
    /// Catalog file written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time in milliseconds
    pub duration_ms: u64,
}

impl ServiceReport {
    /// Report a written catalog
    pub fn written(service: impl Into<String>, operations: usize, path: PathBuf) -> Self {
        Self {
            service: service.into(),
            operations,
            path: Some(path),
            error: None,
            duration_ms: 0,
        }
    }

    /// Report a failure; `operations` is non-zero when only the write failed
    pub fn failed(service: impl Into<String>, operations: usize, error: impl ToString) -> Self {
        Self {
            service: service.into(),
            operations,
            path: None,
            error: Some(error.to_string()),
            duration_ms: 0,
        }
    }

    /// Set the duration
    #[must_use]
    pub fn with_duration(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Whether the catalog file was written
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// One-line summary for terminal output
    pub fn summary_line(&self) -> String {
        match (&self.path, &self.error) {
            (Some(path), None) => format!(
                "{}: {} operations -> {} ({}ms)",
                self.service,
                self.operations,
                path.display(),
                self.duration_ms
            ),
            (_, Some(error)) => format!("{}: FAILED: {}", self.service, error),
            (None, None) => format!("{}: {} operations", self.service, self.operations),
        }
    }
}
