//! Tests for descriptor loader module

use super::*;
use crate::descriptor::{TypeKind, TypeRole};
use crate::error::Error;
use crate::schema::build_catalog;
use crate::config::IntrospectionConfig;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;
use test_case::test_case;

const STORAGE_YAML: &str = r#"
name: StorageClient
operations:
  - name: GetObject
    params:
      - kind: named
        name: StorageClient
        role: client_handle
      - kind: pointer
        target:
          kind: composite
          name: GetObjectInput
          fields:
            - name: Bucket
              alias: bucket
              type: String
            - name: Key
              alias: "key,omitempty"
              type: String
    returns:
      - kind: pointer
        target:
          kind: composite
          name: GetObjectOutput
          fields:
            - name: ContentLength
              type: i64
            - name: ResultMetadata
              type: Metadata
      - kind: named
        name: error
  - name: ListBuckets
"#;

const STORAGE_JSON: &str = r#"{
  "name": "StorageClient",
  "operations": [
    {
      "name": "DeleteObject",
      "params": [
        {"kind": "named", "name": "context.Context"},
        {
          "kind": "composite",
          "name": "DeleteObjectInput",
          "fields": [{"name": "Key", "type": "String", "skip": false}]
        }
      ],
      "returns": [
        {"kind": "named", "name": "SdkError", "role": "error"}
      ]
    }
  ]
}"#;

// ============================================================================
// Format Tests
// ============================================================================

#[test_case("registry/s3.json", DescriptorFormat::Json)]
#[test_case("registry/s3.yaml", DescriptorFormat::Yaml)]
#[test_case("registry/s3.yml", DescriptorFormat::Yaml)]
#[test_case("REGISTRY/S3.YAML", DescriptorFormat::Yaml)]
fn test_format_from_path(path: &str, expected: DescriptorFormat) {
    assert_eq!(DescriptorFormat::from_path(path).unwrap(), expected);
}

#[test_case("registry/s3.toml")]
#[test_case("registry/s3")]
fn test_format_from_path_unsupported(path: &str) {
    let err = DescriptorFormat::from_path(path).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Loading Tests
// ============================================================================

#[test]
fn test_load_yaml_descriptor() {
    let client = load_descriptor_from_str(STORAGE_YAML, DescriptorFormat::Yaml).unwrap();

    assert_eq!(client.name, "StorageClient");
    assert_eq!(client.operations.len(), 2);

    let get = &client.operations[0];
    assert_eq!(get.params.len(), 2);
    assert_eq!(get.params[0].role, TypeRole::ClientHandle);
    assert_eq!(get.params[1].display_name(), "&GetObjectInput");

    let input = get.params[1].composite_target().unwrap();
    assert_eq!(input.fields[1].wire_name(), "key");

    let list = &client.operations[1];
    assert!(list.params.is_empty());
    assert!(list.returns.is_empty());
}

#[test]
fn test_load_json_descriptor() {
    let client = load_descriptor_from_str(STORAGE_JSON, DescriptorFormat::Json).unwrap();

    let delete = &client.operations[0];
    assert!(matches!(delete.params[0].kind, TypeKind::Named { .. }));
    assert!(matches!(delete.params[1].kind, TypeKind::Composite(_)));
    assert_eq!(delete.returns[0].role, TypeRole::Error);
}

#[test]
fn test_loaded_descriptor_builds_catalog() {
    let client = load_descriptor_from_str(STORAGE_YAML, DescriptorFormat::Yaml).unwrap();
    let catalog = build_catalog(&client, &IntrospectionConfig::default()).unwrap();

    let get = catalog.get("GetObject").unwrap();
    let request = get.request.as_ref().unwrap();
    assert_eq!(request.get("bucket").map(String::as_str), Some("String"));
    assert_eq!(request.get("key").map(String::as_str), Some("String"));

    let response = get.response.as_ref().unwrap();
    assert_eq!(response.len(), 1);
    assert_eq!(response.get("ContentLength").map(String::as_str), Some("i64"));

    let list = catalog.get("ListBuckets").unwrap();
    assert!(list.is_empty());
}

#[test]
fn test_load_descriptor_from_file() {
    let dir = tempdir().unwrap();
    let yaml_path = dir.path().join("storage.yaml");
    let json_path = dir.path().join("storage.json");
    fs::write(&yaml_path, STORAGE_YAML).unwrap();
    fs::write(&json_path, STORAGE_JSON).unwrap();

    assert_eq!(load_descriptor(&yaml_path).unwrap().operations.len(), 2);
    assert_eq!(load_descriptor(&json_path).unwrap().operations.len(), 1);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_load_missing_file() {
    let err = load_descriptor("/nonexistent/opcatalog/s3.yaml").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(err.to_string().contains("s3.yaml"));
}

#[test]
fn test_load_malformed_yaml() {
    let err = load_descriptor_from_str("name: [unterminated", DescriptorFormat::Yaml).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_load_unknown_kind() {
    let yaml = r#"
name: StorageClient
operations:
  - name: GetObject
    params:
      - kind: slice
        name: u8
"#;
    let err = load_descriptor_from_str(yaml, DescriptorFormat::Yaml).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_load_duplicate_operations() {
    let yaml = r#"
name: StorageClient
operations:
  - name: GetObject
  - name: GetObject
"#;
    let err = load_descriptor_from_str(yaml, DescriptorFormat::Yaml).unwrap_err();
    assert!(matches!(err, Error::InvalidClient { .. }));
}
