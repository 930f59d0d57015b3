//! Descriptor file parser
//!
//! Reads client descriptors written by hand or exported by other tooling.

use crate::descriptor::ClientDescriptor;
use crate::error::{Error, Result};
use crate::loader::types::DescriptorFormat;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a client descriptor from a `.json`, `.yaml` or `.yml` file
///
/// # Examples
///
/// ```ignore
/// let client = load_descriptor("registry/s3.yaml")?;
/// ```
pub fn load_descriptor(path: impl AsRef<Path>) -> Result<ClientDescriptor> {
    let path = path.as_ref();
    let format = DescriptorFormat::from_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read descriptor file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let client = load_descriptor_from_str(&content, format).map_err(|e| match e {
        Error::Config { message } => Error::config(format!("{}: {message}", path.display())),
        other => other,
    })?;
    debug!(
        "Loaded descriptor {} from {} ({} operations)",
        client.name,
        path.display(),
        client.operations.len()
    );
    Ok(client)
}

/// Load a client descriptor from a string in the given format
pub fn load_descriptor_from_str(content: &str, format: DescriptorFormat) -> Result<ClientDescriptor> {
    let client: ClientDescriptor = match format {
        DescriptorFormat::Json => serde_json::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse descriptor JSON: {e}")))?,
        DescriptorFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse descriptor YAML: {e}")))?,
    };

    client.validate()?;
    Ok(client)
}
