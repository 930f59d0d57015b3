//! Catalog building

use super::extract::{Extraction, OperationShapeExtractor};
use super::flatten::FieldFlattener;
use super::types::{Catalog, FieldMap};
use crate::config::IntrospectionConfig;
use crate::descriptor::ClientDescriptor;
use crate::error::{Error, Result};
use crate::types::{MultiCandidatePolicy, OperationNaming};
use tracing::{debug, info, warn};

/// Builds the operation catalog of a client descriptor
#[derive(Debug, Clone, Default)]
pub struct TypeCatalogBuilder {
    extractor: OperationShapeExtractor,
    multi_candidate: MultiCandidatePolicy,
    naming: OperationNaming,
}

impl TypeCatalogBuilder {
    /// Create a builder around an extractor
    pub fn new(extractor: OperationShapeExtractor) -> Self {
        Self {
            extractor,
            multi_candidate: MultiCandidatePolicy::default(),
            naming: OperationNaming::default(),
        }
    }

    /// Create a builder from introspection settings
    pub fn from_config(config: &IntrospectionConfig) -> Self {
        let flattener = FieldFlattener::new(config.skip_fields.iter().cloned());
        let extractor = OperationShapeExtractor::new(flattener, config.markers.clone());
        Self::new(extractor)
            .with_multi_candidate(config.multi_candidate)
            .with_naming(config.operation_naming)
    }

    /// Set the multi-candidate policy
    #[must_use]
    pub fn with_multi_candidate(mut self, policy: MultiCandidatePolicy) -> Self {
        self.multi_candidate = policy;
        self
    }

    /// Set the operation naming convention
    #[must_use]
    pub fn with_naming(mut self, naming: OperationNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Build the catalog.
    ///
    /// Every operation gets exactly one entry, even when both sides are
    /// absent. An invalid descriptor fails the whole build.
    pub fn build(&self, client: &ClientDescriptor) -> Result<Catalog> {
        client.validate()?;

        let mut catalog = Catalog::new();

        for op in &client.operations {
            let extraction = self.extractor.extract_detailed(op);
            self.check_candidates(&op.name, &extraction)?;

            debug!(
                "Operation {}::{}: request={}, response={}",
                client.name,
                op.name,
                describe_side(extraction.shape.request.as_ref()),
                describe_side(extraction.shape.response.as_ref()),
            );

            let key = self.naming.apply(&op.name);
            if catalog.insert(key.clone(), extraction.shape).is_some() {
                return Err(Error::invalid_client(
                    &client.name,
                    format!("operation name '{key}' is produced by more than one method"),
                ));
            }
        }

        info!(
            "Built catalog for {} with {} operations",
            client.name,
            catalog.len()
        );

        Ok(catalog)
    }

    fn check_candidates(&self, operation: &str, extraction: &Extraction) -> Result<()> {
        let sides = [
            ("request", extraction.request_candidates),
            ("response", extraction.response_candidates),
        ];

        for (side, count) in sides {
            if count <= 1 {
                continue;
            }
            match self.multi_candidate {
                MultiCandidatePolicy::LastWins => warn!(
                    "Operation {} has {} {} candidates, keeping the last",
                    operation, count, side
                ),
                MultiCandidatePolicy::Reject => {
                    return Err(Error::AmbiguousOperation {
                        operation: operation.to_string(),
                        side: side.to_string(),
                        count,
                    })
                }
            }
        }

        Ok(())
    }
}

fn describe_side(fields: Option<&FieldMap>) -> String {
    fields.map_or_else(|| "none".to_string(), |f| format!("{} fields", f.len()))
}

/// Build a catalog with the given introspection settings (convenience function)
pub fn build_catalog(client: &ClientDescriptor, config: &IntrospectionConfig) -> Result<Catalog> {
    TypeCatalogBuilder::from_config(config).build(client)
}
