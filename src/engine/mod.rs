//! Catalog engine module
//!
//! Drives descriptor resolution, catalog building and file output for
//! every configured service.
//!
//! # Overview
//!
//! The engine module provides:
//! - `CatalogEngine` - Runs services concurrently and writes their catalogs
//! - `ServiceReport` - Per-service outcome

mod types;

pub use types::ServiceReport;

use crate::config::{CatalogConfig, ClientSettings, IntrospectionConfig, ServiceConfig, ServiceSource};
use crate::descriptor::ClientDescriptor;
use crate::error::{Error, Result};
use crate::loader::load_descriptor;
use crate::output::CatalogWriter;
use crate::scanner::scan_client;
use crate::schema::{build_catalog, Catalog};
use futures::future::join_all;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument, Span};

/// Builds and writes catalogs for a set of services
#[derive(Debug, Clone)]
pub struct CatalogEngine {
    /// Client construction settings
    settings: ClientSettings,
    /// Type classification settings
    introspection: IntrospectionConfig,
    /// Catalog file writer
    writer: CatalogWriter,
}

impl CatalogEngine {
    /// Create an engine
    pub fn new(
        settings: ClientSettings,
        introspection: IntrospectionConfig,
        writer: CatalogWriter,
    ) -> Self {
        Self {
            settings,
            introspection,
            writer,
        }
    }

    /// Create an engine from a run configuration
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            config.client_settings(),
            config.introspection.clone(),
            CatalogWriter::new(&config.output_dir).with_file_prefix(config.file_prefix.clone()),
        )
    }

    /// Write catalogs into a different directory
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        let prefix = self.writer.file_prefix().to_string();
        self.writer = CatalogWriter::new(output_dir).with_file_prefix(prefix);
        self
    }

    /// Client settings
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Produce the client descriptor of a service
    pub fn resolve_descriptor(service: &ServiceConfig) -> Result<ClientDescriptor> {
        match &service.source {
            ServiceSource::Rust { client, sources } => scan_client(client, sources),
            ServiceSource::Descriptor { descriptor } => load_descriptor(descriptor),
        }
    }

    /// Resolve and build a service catalog without writing it
    pub fn build(&self, service: &ServiceConfig) -> Result<Catalog> {
        let client = Self::resolve_descriptor(service)?;
        build_catalog(&client, &self.introspection)
    }

    /// Build and write one service's catalog.
    ///
    /// Failures are captured in the report rather than returned.
    pub async fn collect_service(&self, service: &ServiceConfig) -> ServiceReport {
        let span = info_span!(
            "service",
            name = %service.name,
            region = %self.settings.region,
            profile = self.settings.profile.as_deref().unwrap_or("default")
        );
        self.collect_in_span(service.clone())
            .instrument(span)
            .await
    }

    async fn collect_in_span(&self, service: ServiceConfig) -> ServiceReport {
        let start = Instant::now();
        let name = service.name.clone();
        info!("Cataloging {}", service.describe_source());

        let engine = self.clone();
        let span = Span::current();
        let built = match tokio::task::spawn_blocking(move || {
            let _guard = span.enter();
            engine.build(&service)
        })
        .await
        {
            Ok(result) => result,
            Err(e) => Err(Error::Task {
                message: e.to_string(),
            }),
        };

        #[allow(clippy::cast_possible_truncation)]
        let elapsed = || start.elapsed().as_millis() as u64;

        let catalog = match built {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Failed to build catalog for {}: {}", name, e);
                return ServiceReport::failed(name, 0, e).with_duration(elapsed());
            }
        };

        match self.writer.write(&name, &catalog).await {
            Ok(path) => ServiceReport::written(name, catalog.len(), path).with_duration(elapsed()),
            Err(e) => {
                if e.is_fatal() {
                    error!("Failed to write catalog for {}: {}", name, e);
                } else {
                    warn!("Catalog for {} built but not written: {}", name, e);
                }
                ServiceReport::failed(name, catalog.len(), e).with_duration(elapsed())
            }
        }
    }

    /// Catalog every service concurrently.
    ///
    /// Reports come back in input order. A failing service does not stop
    /// the others.
    pub async fn run(&self, services: &[ServiceConfig]) -> Vec<ServiceReport> {
        info!(
            "Cataloging {} services (region {})",
            services.len(),
            self.settings.region
        );

        let reports = join_all(services.iter().map(|s| self.collect_service(s))).await;

        let failed = reports.iter().filter(|r| !r.is_success()).count();
        info!(
            "Completed {} services: {} written, {} failed",
            reports.len(),
            reports.len() - failed,
            failed
        );
        reports
    }
}
