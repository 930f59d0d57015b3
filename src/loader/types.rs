//! Loader types

use crate::error::{Error, Result};
use std::path::Path;

/// Serialization format of a descriptor file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Json,
    Yaml,
}

impl DescriptorFormat {
    /// Pick the format from a file extension (`json`, `yaml`, `yml`)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(DescriptorFormat::Json),
            Some("yaml" | "yml") => Ok(DescriptorFormat::Yaml),
            _ => Err(Error::config(format!(
                "Descriptor '{}' must have a .json, .yaml or .yml extension",
                path.display()
            ))),
        }
    }
}
