//! Table writer with overwrite semantics

use super::partition::{partition_batch, PartitionGroup};
use super::writer::{encode_parquet, ParquetWriterConfig};
use crate::error::Result;
use crate::storage::StorageLocation;
use crate::types::TableSpec;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use tracing::{debug, info};

/// Marker object written once a table directory is complete
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// What a single table write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Table name
    pub table: &'static str,
    /// Rows written across all files
    pub rows: usize,
    /// Parquet files written
    pub files: usize,
    /// Objects removed from the previous run
    pub replaced: usize,
}

/// Writes tables as Parquet directories below an output location
#[derive(Debug, Clone)]
pub struct TableWriter {
    location: StorageLocation,
    config: ParquetWriterConfig,
}

impl TableWriter {
    /// Create a writer for `location`
    pub fn new(location: StorageLocation, config: ParquetWriterConfig) -> Self {
        Self { location, config }
    }

    /// The output location
    pub fn location(&self) -> &StorageLocation {
        &self.location
    }

    /// Replace the table directory with the contents of `batch`
    ///
    /// Everything previously stored under the table path is removed first.
    /// Partitioned tables get one `column=value/` directory per distinct
    /// combination of partition values, with the partition columns dropped
    /// from the files. An empty unpartitioned table still gets one file
    /// carrying its schema.
    pub async fn write(&self, table: &TableSpec, batch: &RecordBatch) -> Result<WriteSummary> {
        let replaced = self.location.delete_prefix([table.path]).await?;
        if replaced > 0 {
            debug!(table = table.name, objects = replaced, "Removed previous output");
        }

        let groups = if table.is_partitioned() {
            partition_batch(batch, table.name, table.partition_by)?
        } else {
            vec![PartitionGroup {
                dirs: Vec::new(),
                batch: batch.clone(),
            }]
        };

        let file_name = self.config.file_name(0);
        for group in &groups {
            let data = encode_parquet(&group.batch, &self.config)?;
            let parts = std::iter::once(table.path)
                .chain(group.dirs.iter().map(String::as_str))
                .chain(std::iter::once(file_name.as_str()));
            let path = self.location.path(parts);
            let url = self.location.write(&path, data).await?;
            debug!(
                table = table.name,
                file = %url,
                rows = group.batch.num_rows(),
                "Wrote Parquet file"
            );
        }

        let marker = self.location.path([table.path, SUCCESS_MARKER]);
        self.location.write(&marker, Bytes::new()).await?;

        let summary = WriteSummary {
            table: table.name,
            rows: batch.num_rows(),
            files: groups.len(),
            replaced,
        };
        info!(
            table = summary.table,
            rows = summary.rows,
            files = summary.files,
            partitioned = table.is_partitioned(),
            "Wrote table"
        );
        Ok(summary)
    }
}
