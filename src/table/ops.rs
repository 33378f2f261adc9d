//! Projection, selection and deduplication over record batches

use crate::error::{Error, Result};
use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, UInt32Array};
use arrow::compute::{cast, filter_record_batch, take_record_batch};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::row::{RowConverter, SortField};
use std::collections::HashSet;
use std::sync::Arc;

/// Position of `name` in `batch`, or a missing-column error for `table`
pub fn index_of(batch: &RecordBatch, table: &str, name: &str) -> Result<usize> {
    batch
        .schema_ref()
        .index_of(name)
        .map_err(|_| Error::missing_column(table, name))
}

/// Column `name` of `batch`
pub fn column<'a>(batch: &'a RecordBatch, table: &str, name: &str) -> Result<&'a ArrayRef> {
    Ok(batch.column(index_of(batch, table, name)?))
}

/// Keep only `columns`, in the given order
pub fn select(batch: &RecordBatch, table: &str, columns: &[&str]) -> Result<RecordBatch> {
    let renames: Vec<(&str, &str)> = columns.iter().map(|c| (*c, *c)).collect();
    select_as(batch, table, &renames)
}

/// Keep only the `(source, alias)` columns, renamed to their alias
pub fn select_as(batch: &RecordBatch, table: &str, columns: &[(&str, &str)]) -> Result<RecordBatch> {
    let schema = batch.schema_ref();
    let mut fields = Vec::with_capacity(columns.len());
    let mut arrays = Vec::with_capacity(columns.len());

    for (source, alias) in columns {
        let idx = index_of(batch, table, source)?;
        fields.push(schema.field(idx).clone().with_name(*alias));
        arrays.push(Arc::clone(batch.column(idx)));
    }

    build_batch(fields, arrays, batch.num_rows())
}

/// Append columns, replacing any existing column of the same name in place
pub fn with_columns(batch: &RecordBatch, columns: Vec<(&str, ArrayRef)>) -> Result<RecordBatch> {
    let mut fields: Vec<Field> = batch
        .schema_ref()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    let mut arrays: Vec<ArrayRef> = batch.columns().to_vec();

    for (name, array) in columns {
        if array.len() != batch.num_rows() {
            return Err(Error::output(format!(
                "Column '{name}' has {} rows, expected {}",
                array.len(),
                batch.num_rows()
            )));
        }
        let field = Field::new(name, array.data_type().clone(), true);
        match fields.iter().position(|f| f.name() == name) {
            Some(idx) => {
                fields[idx] = field;
                arrays[idx] = array;
            }
            None => {
                fields.push(field);
                arrays.push(array);
            }
        }
    }

    build_batch(fields, arrays, batch.num_rows())
}

/// Keep rows whose `column` equals `value` (string comparison, nulls never match)
pub fn filter_eq(batch: &RecordBatch, table: &str, column_name: &str, value: &str) -> Result<RecordBatch> {
    let values = cast(column(batch, table, column_name)?.as_ref(), &DataType::Utf8)?;
    let mask: BooleanArray = values
        .as_string::<i32>()
        .iter()
        .map(|v| Some(v == Some(value)))
        .collect();

    Ok(filter_record_batch(batch, &mask)?)
}

/// Remove exact-duplicate rows, keeping the first occurrence of each
///
/// Rows are compared on every column; two nulls compare equal.
pub fn distinct(batch: &RecordBatch) -> Result<RecordBatch> {
    if batch.num_rows() <= 1 {
        return Ok(batch.clone());
    }
    if batch.num_columns() == 0 {
        return Ok(batch.slice(0, 1));
    }

    let sort_fields: Vec<SortField> = batch
        .schema_ref()
        .fields()
        .iter()
        .map(|f| SortField::new(f.data_type().clone()))
        .collect();
    let converter = RowConverter::new(sort_fields)?;
    let rows = converter.convert_columns(batch.columns())?;

    let mut seen = HashSet::with_capacity(rows.num_rows());
    let keep: Vec<u32> = (0..rows.num_rows())
        .filter(|&i| seen.insert(rows.row(i)))
        .map(|i| i as u32)
        .collect();

    if keep.len() == batch.num_rows() {
        return Ok(batch.clone());
    }
    Ok(take_record_batch(batch, &UInt32Array::from(keep))?)
}

pub(crate) fn build_batch(
    fields: Vec<Field>,
    arrays: Vec<ArrayRef>,
    num_rows: usize,
) -> Result<RecordBatch> {
    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &options,
    )?)
}
