//! CLI runner - executes the pipeline

use crate::cli::commands::Cli;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineReport};
use crate::session::Session;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the config, open the session and run the whole pipeline
    pub async fn run(&self) -> Result<PipelineReport> {
        let path = &self.cli.config;
        let config = PipelineConfig::from_file(path)?;
        info!(config = %path.display(), "Loaded configuration");

        let session = Session::from_config(config)?;
        let report = Pipeline::new(&session).run().await?;

        for table in &report.tables {
            info!(
                table = table.table,
                rows = table.rows,
                files = table.files,
                "Table summary"
            );
        }
        Ok(report)
    }
}
