//! Session bootstrap
//!
//! Turns a validated [`PipelineConfig`] into the storage handles the
//! pipeline runs against. Credentials go straight from the config into the
//! store builders.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::output::{ParquetWriterConfig, TableWriter};
use crate::source::JsonSource;
use crate::storage::{StorageLocation, StorageOptions};
use tracing::info;

/// Input source and output writer for one pipeline run
#[derive(Debug)]
pub struct Session {
    config: PipelineConfig,
    input: StorageLocation,
    output: StorageLocation,
}

impl Session {
    /// Open the input and output locations named by `config`
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let options = StorageOptions {
            credentials: config.credentials()?,
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let input = StorageLocation::input(&config.input_data, &options)?;
        let output = StorageLocation::output(&config.output_data, &options)?;

        info!(
            input = %config.input_data,
            output = %config.output_data,
            region = %config.region,
            "Session ready"
        );
        Ok(Self {
            config,
            input,
            output,
        })
    }

    /// The configuration this session was built from
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// JSON reader over the input location
    pub fn source(&self) -> JsonSource {
        JsonSource::new(self.input.clone())
    }

    /// Table writer over the output location
    pub fn writer(&self) -> TableWriter {
        let parquet = ParquetWriterConfig::from(self.config.compression)
            .with_row_group_size(self.config.row_group_size);
        TableWriter::new(self.output.clone(), parquet)
    }
}
