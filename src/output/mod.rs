//! Output module
//!
//! Handles Parquet encoding and table directory layout.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Encoding Arrow RecordBatches as Parquet files
//! - Splitting record sets into Hive-style `column=value/` partitions
//! - Replacing a table directory in one step, ending with a `_SUCCESS` marker

mod partition;
mod table;
mod writer;

pub use partition::{partition_batch, PartitionGroup, DEFAULT_PARTITION};
pub use table::{TableWriter, WriteSummary, SUCCESS_MARKER};
pub use writer::{encode_parquet, ParquetWriterConfig, DEFAULT_ROW_GROUP_SIZE};
