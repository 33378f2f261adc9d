//! JSON input source
//!
//! Reads every file matching a glob below an input location into a single
//! Arrow record set.

use crate::decode::{AutoDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::schema::{infer_schema, json_to_arrow};
use crate::storage::{GlobPattern, StorageLocation};
use crate::types::JsonObject;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use object_store::path::Path as ObjectPath;
use std::sync::Arc;
use tracing::{debug, info};

/// Reader for JSON files below an input location
///
/// Each file may be JSON Lines or a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonSource {
    location: StorageLocation,
    decoder: AutoDecoder,
}

impl JsonSource {
    /// Create a source over `location`
    pub fn new(location: StorageLocation) -> Self {
        Self {
            location,
            decoder: AutoDecoder::new(),
        }
    }

    /// Read all files matching `glob` into one record set
    ///
    /// No matching file, or no record in the matching files, yields an
    /// empty record set with `empty_schema`.
    pub async fn read(&self, glob: &str, empty_schema: &Schema) -> Result<RecordBatch> {
        let pattern = GlobPattern::new(glob)?;
        let files = self.location.list_matching(&pattern).await?;

        let mut records = Vec::new();
        for file in &files {
            records.extend(self.read_file(file).await?);
        }

        let batch = if records.is_empty() {
            RecordBatch::new_empty(Arc::new(empty_schema.clone()))
        } else {
            json_to_arrow(&records, &infer_schema(&records))?
        };

        info!(
            glob = %pattern,
            files = files.len(),
            rows = batch.num_rows(),
            "Read JSON input"
        );
        Ok(batch)
    }

    /// Fetch and decode one object; storage failures keep their typed error
    async fn read_file(&self, file: &ObjectPath) -> Result<Vec<JsonObject>> {
        let url = self.location.display(file);
        let data = self.location.read(file).await?;
        let body = std::str::from_utf8(&data)
            .map_err(|e| Error::decode(&url, format!("File is not UTF-8: {e}")))?;

        let decoded = self.decoder.decode(&url, body)?;
        debug!(file = %url, records = decoded.len(), "Decoded input file");
        Ok(decoded)
    }
}
