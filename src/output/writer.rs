//! Parquet encoding
//!
//! Encodes Arrow RecordBatches into in-memory Parquet files.

use crate::error::Result;
use crate::types::CompressionCodec;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

/// Default maximum rows per row group
pub const DEFAULT_ROW_GROUP_SIZE: usize = 1024 * 1024;

/// Configuration for Parquet writer
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

impl From<CompressionCodec> for ParquetWriterConfig {
    fn from(codec: CompressionCodec) -> Self {
        let config = Self::default();
        match codec {
            CompressionCodec::Snappy => config,
            CompressionCodec::Zstd => config.zstd(),
            CompressionCodec::Gzip => config.gzip(),
            CompressionCodec::None => config.uncompressed(),
        }
    }
}

impl ParquetWriterConfig {
    /// Set the maximum rows per row group
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Use no compression
    #[must_use]
    pub fn uncompressed(mut self) -> Self {
        self.compression = Compression::UNCOMPRESSED;
        self
    }

    /// Use ZSTD compression
    #[must_use]
    pub fn zstd(mut self) -> Self {
        self.compression = Compression::ZSTD(parquet::basic::ZstdLevel::default());
        self
    }

    /// Use GZIP compression
    #[must_use]
    pub fn gzip(mut self) -> Self {
        self.compression = Compression::GZIP(parquet::basic::GzipLevel::default());
        self
    }

    /// Data file name for the `index`-th file of a directory
    ///
    /// `part-00000.snappy.parquet`, or `part-00000.parquet` when uncompressed.
    pub fn file_name(&self, index: usize) -> String {
        let codec = match self.compression {
            Compression::SNAPPY => Some("snappy"),
            Compression::ZSTD(_) => Some("zstd"),
            Compression::GZIP(_) => Some("gz"),
            _ => None,
        };
        match codec {
            Some(codec) => format!("part-{index:05}.{codec}.parquet"),
            None => format!("part-{index:05}.parquet"),
        }
    }

    /// Build writer properties
    fn build_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Encode a RecordBatch as a complete Parquet file in memory
///
/// An empty batch still produces a valid file carrying the schema.
pub fn encode_parquet(batch: &RecordBatch, config: &ParquetWriterConfig) -> Result<Bytes> {
    let mut buf = Vec::new();
    let props = config.build_properties();

    let mut writer = ArrowWriter::try_new(&mut buf, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    Ok(Bytes::from(buf))
}
