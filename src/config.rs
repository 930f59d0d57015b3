//! Configuration types for catalog runs
//!
//! This module contains the configuration structures loaded from YAML:
//! which services to scan, where to write catalogs, and how the
//! introspection engine classifies types.

use crate::error::{Error, Result};
use crate::types::{MultiCandidatePolicy, OperationNaming};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete run configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Region the clients would be constructed for
    #[serde(default = "default_region")]
    pub region: String,

    /// Credential profile name
    #[serde(default)]
    pub profile: Option<String>,

    /// Directory catalogs are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Prefix prepended to every catalog file name
    #[serde(default)]
    pub file_prefix: String,

    /// Type classification settings
    #[serde(default)]
    pub introspection: IntrospectionConfig,

    /// Services to catalog
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl CatalogConfig {
    /// Load and validate a config file.
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_str_in(&content, base_dir)
    }

    /// Parse and validate config YAML, resolving relative paths against `base_dir`
    pub fn from_str_in(yaml: &str, base_dir: impl AsRef<Path>) -> Result<Self> {
        let mut config: CatalogConfig = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
        config.resolve_paths(base_dir.as_ref());
        config.validate()?;
        Ok(config)
    }

    /// Explicit client settings for the engine
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            region: self.region.clone(),
            profile: self.profile.clone(),
        }
    }

    /// Look up a service by name
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Select services by name, preserving the requested order
    pub fn select_services(&self, names: &[String]) -> Result<Vec<ServiceConfig>> {
        names
            .iter()
            .map(|name| {
                self.service(name).cloned().ok_or_else(|| {
                    let known: Vec<_> = self.services.iter().map(|s| s.name.as_str()).collect();
                    Error::config(format!(
                        "Unknown service '{name}'. Configured services: {}",
                        known.join(", ")
                    ))
                })
            })
            .collect()
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        if self.output_dir.is_relative() {
            self.output_dir = base_dir.join(&self.output_dir);
        }
        for service in &mut self.services {
            match &mut service.source {
                ServiceSource::Rust { sources, .. } => {
                    for source in sources.iter_mut() {
                        if source.is_relative() {
                            *source = base_dir.join(&*source);
                        }
                    }
                }
                ServiceSource::Descriptor { descriptor } => {
                    if descriptor.is_relative() {
                        *descriptor = base_dir.join(&*descriptor);
                    }
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(Error::config("Region cannot be empty"));
        }

        if self.services.is_empty() {
            return Err(Error::config("Config must list at least one service"));
        }

        let names: HashSet<_> = self.services.iter().map(|s| &s.name).collect();
        if names.len() != self.services.len() {
            return Err(Error::config("Duplicate service names found"));
        }

        for service in &self.services {
            service.validate()?;
        }

        Ok(())
    }
}

// ============================================================================
// Client Settings
// ============================================================================

/// Settings a live client would be constructed with.
///
/// Passed explicitly into the engine instead of living in process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Region name
    pub region: String,
    /// Credential profile
    pub profile: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            region: default_region(),
            profile: None,
        }
    }
}

// ============================================================================
// Services
// ============================================================================

/// One service to catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name, used in the output file name
    pub name: String,

    /// Where the client descriptor comes from
    #[serde(flatten)]
    pub source: ServiceSource,
}

/// Source of a client descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceSource {
    /// Scan Rust source files for a client type
    Rust {
        /// Client type name
        client: String,
        /// Files or directories to scan
        #[serde(default)]
        sources: Vec<PathBuf>,
    },
    /// Load a pre-built descriptor (JSON or YAML)
    Descriptor {
        /// Descriptor file path
        descriptor: PathBuf,
    },
}

impl ServiceConfig {
    /// Validate a service entry
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::config("Service name cannot be empty"));
        }

        // The name becomes part of the output file name
        if self.name.contains(|c| c == '/' || c == '\\') || self.name.contains("..") {
            return Err(Error::config(format!(
                "Service name '{}' cannot contain path separators or '..'",
                self.name
            )));
        }

        match &self.source {
            ServiceSource::Rust { client, sources } => {
                if client.trim().is_empty() {
                    return Err(Error::config(format!(
                        "Service '{}' client type cannot be empty",
                        self.name
                    )));
                }
                if sources.is_empty() {
                    return Err(Error::config(format!(
                        "Service '{}' must list at least one source path",
                        self.name
                    )));
                }
            }
            ServiceSource::Descriptor { descriptor } => {
                if descriptor.as_os_str().is_empty() {
                    return Err(Error::config(format!(
                        "Service '{}' descriptor path cannot be empty",
                        self.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Short human-readable description of the source
    pub fn describe_source(&self) -> String {
        match &self.source {
            ServiceSource::Rust { client, sources } => {
                let paths: Vec<_> = sources.iter().map(|p| p.display().to_string()).collect();
                format!("rust client {client} in {}", paths.join(", "))
            }
            ServiceSource::Descriptor { descriptor } => {
                format!("descriptor {}", descriptor.display())
            }
        }
    }
}

// ============================================================================
// Introspection
// ============================================================================

/// Settings for the type-introspection engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionConfig {
    /// Raw field names that never appear in a field map
    #[serde(default = "default_skip_fields")]
    pub skip_fields: Vec<String>,

    /// Display-name markers for untagged infrastructure types
    #[serde(default)]
    pub markers: InfrastructureMarkers,

    /// Handling of operations with several candidates per side
    #[serde(default)]
    pub multi_candidate: MultiCandidatePolicy,

    /// Naming of catalog keys
    #[serde(default)]
    pub operation_naming: OperationNaming,
}

/// Internal serialization marker and result metadata fields
pub const DEFAULT_SKIP_FIELDS: &[&str] = &["noSmithyDocumentSerde", "ResultMetadata"];

fn default_skip_fields() -> Vec<String> {
    DEFAULT_SKIP_FIELDS.iter().map(ToString::to_string).collect()
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            skip_fields: default_skip_fields(),
            markers: InfrastructureMarkers::default(),
            multi_candidate: MultiCandidatePolicy::default(),
            operation_naming: OperationNaming::default(),
        }
    }
}

/// Substrings identifying infrastructure types by display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureMarkers {
    /// Client handle markers
    #[serde(default = "default_client_markers")]
    pub client_handle: Vec<String>,
    /// Context carrier markers
    #[serde(default = "default_context_markers")]
    pub context: Vec<String>,
    /// Call options markers
    #[serde(default = "default_options_markers")]
    pub call_options: Vec<String>,
    /// Error markers (checked on returns only)
    #[serde(default = "default_error_markers")]
    pub error: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn default_client_markers() -> Vec<String> {
    strings(&["Client"])
}

fn default_context_markers() -> Vec<String> {
    strings(&["context"])
}

fn default_options_markers() -> Vec<String> {
    strings(&["Options"])
}

fn default_error_markers() -> Vec<String> {
    strings(&["error"])
}

impl Default for InfrastructureMarkers {
    fn default() -> Self {
        Self {
            client_handle: default_client_markers(),
            context: default_context_markers(),
            call_options: default_options_markers(),
            error: default_error_markers(),
        }
    }
}

impl InfrastructureMarkers {
    /// Whether a parameter display name marks an infrastructure type
    pub fn matches_param(&self, display_name: &str) -> bool {
        contains_any(display_name, &self.client_handle)
            || contains_any(display_name, &self.context)
            || contains_any(display_name, &self.call_options)
    }

    /// Whether a return display name marks an error channel
    pub fn matches_return(&self, display_name: &str) -> bool {
        contains_any(display_name, &self.error)
    }
}

fn contains_any(haystack: &str, markers: &[String]) -> bool {
    markers
        .iter()
        .any(|marker| !marker.is_empty() && haystack.contains(marker.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const CONFIG: &str = r#"
region: eu-west-1
output_dir: out
file_prefix: aws_
services:
  - name: widgets
    kind: rust
    client: WidgetClient
    sources: [sdk/widgets/src]
  - name: s3
    kind: descriptor
    descriptor: registry/s3.yaml
"#;

    #[test]
    fn test_load_config() {
        let config = CatalogConfig::from_str_in(CONFIG, "/etc/opcatalog").unwrap();

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.file_prefix, "aws_");
        assert_eq!(config.output_dir, PathBuf::from("/etc/opcatalog/out"));
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.introspection, IntrospectionConfig::default());

        match &config.services[0].source {
            ServiceSource::Rust { client, sources } => {
                assert_eq!(client, "WidgetClient");
                assert_eq!(sources, &[PathBuf::from("/etc/opcatalog/sdk/widgets/src")]);
            }
            ServiceSource::Descriptor { .. } => panic!("expected a rust source"),
        }

        match &config.services[1].source {
            ServiceSource::Descriptor { descriptor } => {
                assert_eq!(descriptor, &PathBuf::from("/etc/opcatalog/registry/s3.yaml"));
            }
            ServiceSource::Rust { .. } => panic!("expected a descriptor source"),
        }
    }

    #[test]
    fn test_config_defaults() {
        let yaml = r#"
services:
  - name: s3
    kind: descriptor
    descriptor: /abs/s3.json
"#;
        let config = CatalogConfig::from_str_in(yaml, "").unwrap();
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.profile, None);
        assert_eq!(config.file_prefix, "");
        assert_eq!(
            config.introspection.skip_fields,
            vec!["noSmithyDocumentSerde", "ResultMetadata"]
        );
    }

    #[test]
    fn test_introspection_overrides() {
        let yaml = r#"
introspection:
  skip_fields: [Metadata]
  multi_candidate: reject
  operation_naming: pascal
  markers:
    context: [Ctx]
services:
  - name: s3
    kind: descriptor
    descriptor: s3.json
"#;
        let config = CatalogConfig::from_str_in(yaml, "").unwrap();
        let introspection = &config.introspection;
        assert_eq!(introspection.skip_fields, vec!["Metadata"]);
        assert_eq!(introspection.multi_candidate, MultiCandidatePolicy::Reject);
        assert_eq!(introspection.operation_naming, OperationNaming::Pascal);
        assert_eq!(introspection.markers.context, vec!["Ctx"]);
        assert_eq!(introspection.markers.client_handle, vec!["Client"]);
    }

    #[test_case("../escape")]
    #[test_case("nested/s3")]
    #[test_case("nested\\s3")]
    #[test_case("s3..backup")]
    fn test_validate_rejects_path_like_service_names(name: &str) {
        let yaml = format!(
            "services:\n  - name: '{name}'\n    kind: descriptor\n    descriptor: s3.json\n"
        );
        let err = CatalogConfig::from_str_in(&yaml, "").unwrap_err();
        assert!(err.to_string().contains("path separators"));
    }

    #[test]
    fn test_validate_errors() {
        let no_services = "region: us-east-1\n";
        assert!(CatalogConfig::from_str_in(no_services, "").is_err());

        let empty_region = r#"
region: ""
services:
  - name: s3
    kind: descriptor
    descriptor: s3.json
"#;
        assert!(CatalogConfig::from_str_in(empty_region, "").is_err());

        let duplicate = r#"
services:
  - name: s3
    kind: descriptor
    descriptor: a.json
  - name: s3
    kind: descriptor
    descriptor: b.json
"#;
        let err = CatalogConfig::from_str_in(duplicate, "").unwrap_err();
        assert!(err.to_string().contains("Duplicate service names"));

        let no_sources = r#"
services:
  - name: widgets
    kind: rust
    client: WidgetClient
"#;
        let err = CatalogConfig::from_str_in(no_sources, "").unwrap_err();
        assert!(err.to_string().contains("at least one source path"));
    }

    #[test]
    fn test_select_services() {
        let config = CatalogConfig::from_str_in(CONFIG, "").unwrap();

        let selected = config
            .select_services(&["s3".to_string(), "widgets".to_string()])
            .unwrap();
        assert_eq!(selected[0].name, "s3");
        assert_eq!(selected[1].name, "widgets");

        let err = config.select_services(&["ec2".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Unknown service 'ec2'"));
    }

    #[test]
    fn test_markers() {
        let markers = InfrastructureMarkers::default();

        assert!(markers.matches_param("&WidgetClient"));
        assert!(markers.matches_param("context.Context"));
        assert!(markers.matches_param("[]func(*s3.Options)"));
        assert!(!markers.matches_param("&GetWidgetInput"));

        assert!(markers.matches_return("error"));
        assert!(markers.matches_return("*smithy.error"));
        assert!(!markers.matches_return("&GetWidgetOutput"));

        // Payload names that merely contain a marker word are kept
        assert!(!markers.matches_param("&CreateContextInput"));
        assert!(!markers.matches_return("ListErrorsOutput"));
    }

    #[test]
    fn test_client_settings() {
        let config = CatalogConfig::from_str_in(CONFIG, "").unwrap();
        let settings = config.client_settings();
        assert_eq!(settings.region, "eu-west-1");
        assert_eq!(settings.profile, None);
    }
}
