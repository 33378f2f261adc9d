//! Hive-style partitioning of a record set

use crate::error::Result;
use crate::table::index_of;
use arrow::array::{Array, ArrayRef, UInt32Array};
use arrow::compute::take_record_batch;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use std::collections::BTreeMap;

/// Directory name used for a null partition value
pub const DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

/// Rows sharing one combination of partition values
#[derive(Debug, Clone)]
pub struct PartitionGroup {
    /// `column=value` directory segments, outermost first
    pub dirs: Vec<String>,
    /// The rows, without the partition columns
    pub batch: RecordBatch,
}

/// Split `batch` by the values of `partition_by`
///
/// Groups come back ordered by their directory segments; rows keep their
/// relative order inside a group. An empty batch yields no group.
pub fn partition_batch(
    batch: &RecordBatch,
    table: &str,
    partition_by: &[&str],
) -> Result<Vec<PartitionGroup>> {
    let key_indices = partition_by
        .iter()
        .map(|name| index_of(batch, table, name))
        .collect::<Result<Vec<usize>>>()?;

    let data_indices: Vec<usize> = (0..batch.num_columns())
        .filter(|i| !key_indices.contains(i))
        .collect();

    let mut groups: BTreeMap<Vec<String>, Vec<u32>> = BTreeMap::new();
    for row in 0..batch.num_rows() {
        let mut dirs = Vec::with_capacity(key_indices.len());
        for (name, &idx) in partition_by.iter().zip(&key_indices) {
            let value = partition_value(batch.column(idx), row)?;
            dirs.push(format!("{name}={value}"));
        }
        groups.entry(dirs).or_default().push(row as u32);
    }

    groups
        .into_iter()
        .map(|(dirs, rows)| {
            let rows = take_record_batch(batch, &UInt32Array::from(rows))?;
            Ok(PartitionGroup {
                dirs,
                batch: rows.project(&data_indices)?,
            })
        })
        .collect()
}

fn partition_value(column: &ArrayRef, row: usize) -> Result<String> {
    if column.is_null(row) {
        return Ok(DEFAULT_PARTITION.to_string());
    }
    let value = array_value_to_string(column, row)?;
    if value.is_empty() {
        Ok(DEFAULT_PARTITION.to_string())
    } else {
        Ok(value)
    }
}
