//! Pipeline configuration
//!
//! The pipeline is configured by a single YAML file. Storage credentials are
//! read from it once at startup and handed to the storage builders
//! explicitly; the process environment is never touched.
//!
//! ```yaml
//! keys:
//!   AWS_ACCESS_KEY_ID: AKIA...
//!   AWS_SECRET_ACCESS_KEY: ...
//! input_data: s3a://udacity-dend/
//! output_data: s3a://my-bucket/lake/
//! ```

use crate::error::{Error, Result};
use crate::output::DEFAULT_ROW_GROUP_SIZE;
use crate::types::CompressionCodec;
use serde::Deserialize;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "dl.yaml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete pipeline configuration loaded from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Storage credentials
    #[serde(default, alias = "KEYS")]
    pub keys: KeysConfig,

    /// Object storage region
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom S3-compatible endpoint (MinIO, R2, ...)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Base location of the raw JSON inputs
    #[serde(default = "default_input_data")]
    pub input_data: String,

    /// Base location the five tables are written under
    #[serde(default = "default_output_data")]
    pub output_data: String,

    /// Song metadata glob, relative to `input_data`
    #[serde(default = "default_song_data")]
    pub song_data: String,

    /// Event log glob, relative to `input_data`
    #[serde(default = "default_log_data")]
    pub log_data: String,

    /// Song metadata glob used for the songplays join, relative to `input_data`
    #[serde(default = "default_song_data")]
    pub songplay_song_data: String,

    /// Parquet compression codec
    #[serde(default)]
    pub compression: CompressionCodec,

    /// Maximum rows per Parquet row group
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

fn default_region() -> String {
    "us-west-2".to_string()
}

fn default_input_data() -> String {
    "s3a://udacity-dend/".to_string()
}

fn default_output_data() -> String {
    "s3a://udacity-data-eng-project/".to_string()
}

fn default_song_data() -> String {
    "song_data/*/*/*/*.json".to_string()
}

fn default_log_data() -> String {
    "log_data/*/*/*.json".to_string()
}

fn default_row_group_size() -> usize {
    DEFAULT_ROW_GROUP_SIZE
}

/// Raw credential section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysConfig {
    #[serde(rename = "AWS_ACCESS_KEY_ID", alias = "aws_access_key_id", default)]
    pub aws_access_key_id: Option<String>,

    #[serde(rename = "AWS_SECRET_ACCESS_KEY", alias = "aws_secret_access_key", default)]
    pub aws_secret_access_key: Option<String>,
}

/// Validated storage credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .finish()
    }
}

impl PipelineConfig {
    /// Load and validate the config file at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML config document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that everything the pipeline needs before touching storage is present
    pub fn validate(&self) -> Result<()> {
        self.credentials()?;

        for (field, value) in [
            ("input_data", &self.input_data),
            ("output_data", &self.output_data),
            ("song_data", &self.song_data),
            ("log_data", &self.log_data),
            ("songplay_song_data", &self.songplay_song_data),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_value(field, "must not be empty"));
            }
        }

        if self.row_group_size == 0 {
            return Err(Error::invalid_value("row_group_size", "must be greater than 0"));
        }

        Ok(())
    }

    /// Extract the credentials, failing if either key is absent or blank
    pub fn credentials(&self) -> Result<Credentials> {
        let access_key_id = required(
            self.keys.aws_access_key_id.as_deref(),
            "AWS_ACCESS_KEY_ID",
        )?;
        let secret_access_key = required(
            self.keys.aws_secret_access_key.as_deref(),
            "AWS_SECRET_ACCESS_KEY",
        )?;

        Ok(Credentials {
            access_key_id,
            secret_access_key,
        })
    }
}

fn required(value: Option<&str>, field: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::missing_field(field)),
    }
}
