//! Catalog file writer
//!
//! Renders catalogs as indented JSON and writes one file per service.

use crate::error::{Error, Result};
use crate::schema::Catalog;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Suffix of every catalog file name
pub const FILE_SUFFIX: &str = "_operations.json";

/// Writes service catalogs into an output directory
#[derive(Debug, Clone)]
pub struct CatalogWriter {
    output_dir: PathBuf,
    file_prefix: String,
}

impl CatalogWriter {
    /// Create a writer for a directory with no file prefix
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            file_prefix: String::new(),
        }
    }

    /// Set the prefix placed before the service name
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// File name prefix
    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    /// `<prefix><service>_operations.json`
    pub fn file_name(&self, service: &str) -> String {
        format!("{}{}{}", self.file_prefix, service, FILE_SUFFIX)
    }

    /// Full path of a service's catalog file
    pub fn path_for(&self, service: &str) -> PathBuf {
        self.output_dir.join(self.file_name(service))
    }

    /// Render a catalog as two-space indented JSON with sorted keys
    pub fn render(&self, catalog: &Catalog) -> Result<String> {
        catalog
            .to_json_pretty()
            .map_err(|e| Error::output(format!("Failed to serialize catalog: {e}")))
    }

    /// Write a service catalog, replacing any previous file atomically.
    ///
    /// Returns the path written.
    pub async fn write(&self, service: &str, catalog: &Catalog) -> Result<PathBuf> {
        let contents = self.render(catalog)?;
        let path = self.path_for(service);

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                Error::output(format!(
                    "Failed to create output directory '{}': {e}",
                    self.output_dir.display()
                ))
            })?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| {
                Error::output(format!(
                    "Failed to write catalog file '{}': {e}",
                    temp_path.display()
                ))
            })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                debug!("Could not remove {}: {}", temp_path.display(), cleanup);
            }
            return Err(Error::output(format!(
                "Failed to rename catalog file '{}': {e}",
                path.display()
            )));
        }

        info!(
            "Wrote {} operations for {} to {}",
            catalog.len(),
            service,
            path.display()
        );
        Ok(path)
    }
}
