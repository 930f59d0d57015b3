//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{CatalogConfig, IntrospectionConfig};
use crate::engine::{CatalogEngine, ServiceReport};
use crate::error::{Error, Result};
use crate::loader::load_descriptor;
use crate::scanner::scan_client;
use crate::schema::{build_catalog, Catalog};
use crate::types::OperationNaming;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command.
    ///
    /// Returns `false` when the command completed but some service failed.
    pub async fn run(&self) -> Result<bool> {
        match &self.cli.command {
            Commands::Scan {
                services,
                output_dir,
            } => self.scan(services, output_dir.as_deref()).await,
            Commands::Inspect {
                source,
                client,
                descriptor,
                pascal,
                compact,
            } => {
                self.inspect(
                    source,
                    client.as_deref(),
                    descriptor.as_deref(),
                    *pascal,
                    *compact,
                )?;
                Ok(true)
            }
            Commands::Services => {
                self.services()?;
                Ok(true)
            }
            Commands::Validate => {
                self.validate()?;
                Ok(true)
            }
        }
    }

    /// Load the run configuration
    fn load_config(&self) -> Result<CatalogConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -c flag)"))?;
        CatalogConfig::from_file(path)
    }

    /// Build and write catalogs
    async fn scan(&self, names: &[String], output_dir: Option<&Path>) -> Result<bool> {
        let config = self.load_config()?;
        let services = if names.is_empty() {
            config.services.clone()
        } else {
            config.select_services(names)?
        };

        let mut engine = CatalogEngine::from_config(&config);
        if let Some(dir) = output_dir {
            engine = engine.with_output_dir(dir);
        }

        let reports = engine.run(&services).await;
        for report in &reports {
            self.output_report(report);
        }

        Ok(reports.iter().all(ServiceReport::is_success))
    }

    /// Build one catalog and print it
    fn inspect(
        &self,
        sources: &[PathBuf],
        client: Option<&str>,
        descriptor: Option<&Path>,
        pascal: bool,
        compact: bool,
    ) -> Result<()> {
        let descriptor = match (descriptor, client) {
            (Some(path), _) => load_descriptor(path)?,
            (None, Some(client)) if !sources.is_empty() => scan_client(client, sources)?,
            _ => {
                return Err(Error::config(
                    "inspect needs --descriptor PATH or --source PATH... with --client NAME",
                ))
            }
        };

        let mut introspection = match &self.cli.config {
            Some(_) => self.load_config()?.introspection,
            None => IntrospectionConfig::default(),
        };
        if pascal {
            introspection.operation_naming = OperationNaming::Pascal;
        }

        let catalog = build_catalog(&descriptor, &introspection)?;
        println!("{}", render_catalog(&catalog, compact)?);
        Ok(())
    }

    /// List configured services
    fn services(&self) -> Result<()> {
        let config = self.load_config()?;

        for service in &config.services {
            match self.cli.format {
                OutputFormat::Text => {
                    println!("{}\t{}", service.name, service.describe_source());
                }
                OutputFormat::Json => self.output_message(&json!({
                    "type": "SERVICE",
                    "service": service,
                })),
            }
        }

        Ok(())
    }

    /// Validate the run configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        let message = format!(
            "Config is valid with {} services (region {}, output {})",
            config.services.len(),
            config.region,
            config.output_dir.display()
        );

        match self.cli.format {
            OutputFormat::Text => println!("{message}"),
            OutputFormat::Json => self.output_message(&json!({
                "type": "LOG",
                "log": {
                    "level": "INFO",
                    "message": message
                }
            })),
        }

        Ok(())
    }

    fn output_report(&self, report: &ServiceReport) {
        match self.cli.format {
            OutputFormat::Text => println!("{}", report.summary_line()),
            OutputFormat::Json => self.output_message(&json!({
                "type": "REPORT",
                "report": report,
            })),
        }
    }

    fn output_message(&self, msg: &Value) {
        println!("{}", serde_json::to_string(msg).unwrap_or_default());
    }
}

/// Render a catalog for stdout
fn render_catalog(catalog: &Catalog, compact: bool) -> Result<String> {
    if compact {
        Ok(serde_json::to_string(catalog)?)
    } else {
        catalog.to_json_pretty()
    }
}
