//! Integration tests over temporary client trees
//!
//! Tests the full end-to-end flow: YAML config → sources/descriptors → catalog JSON files

use opcatalog::config::CatalogConfig;
use opcatalog::engine::CatalogEngine;
use opcatalog::schema::build_catalog;
use opcatalog::scanner::SourceScanner;
use opcatalog::{Error, IntrospectionConfig, MultiCandidatePolicy};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const STORAGE_CLIENT: &str = r#"
use crate::types::{GetObjectInput, GetObjectOutput, ListBucketsOutput, PutObjectInput};

pub struct StorageClient {
    config: Config,
}

impl StorageClient {
    pub fn from_conf(config: Config) -> Self {
        Self { config }
    }

    pub async fn get_object(
        &self,
        ctx: &Context,
        input: GetObjectInput,
        opts: Option<RequestOptions>,
    ) -> Result<GetObjectOutput, SdkError> {
        unimplemented!()
    }

    pub async fn put_object(&self, input: &PutObjectInput) -> Result<(), SdkError> {
        unimplemented!()
    }

    pub async fn list_buckets(&self, ctx: &Context) -> Result<ListBucketsOutput, SdkError> {
        unimplemented!()
    }
}
"#;

const STORAGE_TYPES: &str = r#"
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetObjectInput {
    pub bucket: String,
    pub key: String,
    #[serde(rename = "versionId")]
    pub version_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetObjectOutput {
    pub content_length: i64,
    pub body: Vec<u8>,
    #[serde(rename = "ResultMetadata")]
    pub result_metadata: Metadata,
}

#[derive(Debug, Serialize)]
pub struct PutObjectInput {
    pub bucket: String,
    #[serde(skip)]
    pub checksum_cache: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ListBucketsOutput {
    pub buckets: Vec<Bucket>,
}
"#;

const COMPUTE_DESCRIPTOR: &str = r#"{
  "name": "ComputeClient",
  "operations": [
    {
      "name": "DescribeInstances",
      "params": [
        {"kind": "pointer", "target": {"kind": "named", "name": "Client"}},
        {"kind": "named", "name": "context.Context"},
        {
          "kind": "pointer",
          "target": {
            "kind": "composite",
            "name": "DescribeInstancesInput",
            "fields": [
              {"name": "MaxResults", "alias": "maxResults,omitempty", "type": "*int32"},
              {"name": "noSmithyDocumentSerde", "type": "document.NoSerde"}
            ]
          }
        },
        {"kind": "named", "name": "func(*Options)"}
      ],
      "returns": [
        {
          "kind": "pointer",
          "target": {
            "kind": "composite",
            "name": "DescribeInstancesOutput",
            "fields": [
              {"name": "Reservations", "type": "[]types.Reservation"},
              {"name": "ResultMetadata", "type": "middleware.Metadata"}
            ]
          }
        },
        {"kind": "named", "name": "error"}
      ]
    }
  ]
}"#;

const CONFIG: &str = r"
region: us-west-2
output_dir: catalogs
file_prefix: aws_
introspection:
  operation_naming: pascal
services:
  - name: s3
    kind: rust
    client: StorageClient
    sources: [sdk/storage/src]
  - name: ec2
    kind: descriptor
    descriptor: registry/ec2.json
";

fn write_tree(root: &Path) {
    let src = root.join("sdk").join("storage").join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("client.rs"), STORAGE_CLIENT).unwrap();
    fs::write(src.join("types.rs"), STORAGE_TYPES).unwrap();

    let registry = root.join("registry");
    fs::create_dir_all(&registry).unwrap();
    fs::write(registry.join("ec2.json"), COMPUTE_DESCRIPTOR).unwrap();

    fs::write(root.join("opcatalog.yaml"), CONFIG).unwrap();
}

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    write_tree(dir.path());
    dir
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// End-to-End Tests
// ============================================================================

#[tokio::test]
async fn test_full_run_writes_expected_catalogs() {
    let dir = workspace();
    let config = CatalogConfig::from_file(dir.path().join("opcatalog.yaml")).unwrap();
    let engine = CatalogEngine::from_config(&config);

    let reports = engine.run(&config.services).await;
    assert!(reports.iter().all(|r| r.is_success()), "{reports:?}");

    let catalogs = dir.path().join("catalogs");
    assert_eq!(
        read_json(&catalogs.join("aws_s3_operations.json")),
        json!({
            "GetObject": {
                "requestParameters": {
                    "Bucket": "String",
                    "Key": "String",
                    "versionId": "Option<String>"
                },
                "responseElements": {
                    "Body": "Vec<u8>",
                    "ContentLength": "i64",
                    "ResultMetadata": "Metadata"
                }
            },
            "ListBuckets": {
                "requestParameters": null,
                "responseElements": {"buckets": "Vec<Bucket>"}
            },
            "PutObject": {
                "requestParameters": {"bucket": "String"},
                "responseElements": null
            }
        })
    );

    assert_eq!(
        read_json(&catalogs.join("aws_ec2_operations.json")),
        json!({
            "DescribeInstances": {
                "requestParameters": {"maxResults": "*int32"},
                "responseElements": {"Reservations": "[]types.Reservation"}
            }
        })
    );
}

#[tokio::test]
async fn test_output_is_deterministic() {
    let dir = workspace();
    let config = CatalogConfig::from_file(dir.path().join("opcatalog.yaml")).unwrap();
    let engine = CatalogEngine::from_config(&config);
    let path = dir.path().join("catalogs").join("aws_s3_operations.json");

    engine.run(&config.services).await;
    let first = fs::read_to_string(&path).unwrap();
    engine.run(&config.services).await;
    let second = fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with("{\n  \"GetObject\": {\n    \"requestParameters\": {"));
}

#[tokio::test]
async fn test_failing_service_does_not_stop_others() {
    let dir = workspace();
    let yaml = CONFIG.replace("client: StorageClient", "client: MissingClient");
    let config = CatalogConfig::from_str_in(&yaml, dir.path()).unwrap();

    let reports = CatalogEngine::from_config(&config)
        .run(&config.services)
        .await;

    assert_eq!(reports.len(), 2);
    assert!(!reports[0].is_success());
    assert!(reports[0].error.as_ref().unwrap().contains("MissingClient"));
    assert!(reports[1].is_success());

    let catalogs = dir.path().join("catalogs");
    assert!(!catalogs.join("aws_s3_operations.json").exists());
    assert!(catalogs.join("aws_ec2_operations.json").exists());
}

#[test]
fn test_selecting_unknown_service_is_config_error() {
    let dir = workspace();
    let config = CatalogConfig::from_file(dir.path().join("opcatalog.yaml")).unwrap();

    let selected = config.select_services(&["ec2".to_string()]).unwrap();
    assert_eq!(selected.len(), 1);

    let err = config
        .select_services(&["lambda".to_string()])
        .unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(err.to_string().contains("s3, ec2"));
}

// ============================================================================
// Builder Policy Tests
// ============================================================================

#[test]
fn test_reject_policy_over_scanned_sources() {
    let source = r"
pub struct Client;
pub struct Left { pub a: u8 }
pub struct Right { pub b: u8 }
impl Client {
    pub fn merge(&self, left: Left, right: Right) {}
}
";
    let mut scanner = SourceScanner::new();
    scanner.add_source("client.rs", source).unwrap();
    let client = scanner.client_descriptor("Client").unwrap();

    let lenient = build_catalog(&client, &IntrospectionConfig::default()).unwrap();
    let merge = lenient.get("merge").unwrap();
    assert_eq!(
        merge.request.as_ref().unwrap().keys().collect::<Vec<_>>(),
        vec!["b"]
    );

    let strict = IntrospectionConfig {
        multi_candidate: MultiCandidatePolicy::Reject,
        ..IntrospectionConfig::default()
    };
    let err = build_catalog(&client, &strict).unwrap_err();
    assert!(matches!(err, Error::AmbiguousOperation { count: 2, .. }));
}
