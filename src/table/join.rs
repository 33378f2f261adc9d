//! Typed inner equi-join over explicit key columns

use super::ops::{build_batch, column, index_of};
use crate::error::Result;
use arrow::array::{Array, ArrayRef, AsArray, UInt32Array};
use arrow::compute::{cast, take_record_batch};
use arrow::datatypes::{DataType, Float32Type, Float64Type};
use arrow::record_batch::RecordBatch;
use arrow::row::{Row, RowConverter, SortField};
use std::collections::HashMap;
use std::sync::Arc;

/// Which input of a join a projected column comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One equality condition: `left.<left> = right.<right>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinKey<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

impl<'a> JoinKey<'a> {
    pub const fn new(left: &'a str, right: &'a str) -> Self {
        Self { left, right }
    }
}

/// Matched row pairs of an inner join, row-aligned across both sides
#[derive(Debug, Clone)]
pub struct Joined {
    left: RecordBatch,
    right: RecordBatch,
}

impl Joined {
    /// Number of matched pairs
    pub fn num_rows(&self) -> usize {
        self.left.num_rows()
    }

    /// Build the output record set from `(side, column, alias)` triples
    pub fn project(&self, table: &str, columns: &[(Side, &str, &str)]) -> Result<RecordBatch> {
        let mut fields = Vec::with_capacity(columns.len());
        let mut arrays = Vec::with_capacity(columns.len());

        for (side, name, alias) in columns {
            let source = match side {
                Side::Left => &self.left,
                Side::Right => &self.right,
            };
            let idx = index_of(source, table, name)?;
            fields.push(source.schema_ref().field(idx).clone().with_name(*alias));
            arrays.push(Arc::clone(source.column(idx)));
        }

        build_batch(fields, arrays, self.num_rows())
    }
}

/// Inner join `left` and `right` on every key being equal
///
/// Comparison is exact: strings are case-sensitive and floats carry no
/// tolerance, though `-0.0` equals `0.0`. A row with
/// a null in any key column never matches. Each key pair is compared in a
/// common type: identical types as-is, two numeric types as Float64,
/// anything else as Utf8. Output pairs follow left row order, then right
/// row order.
pub fn inner_join(
    left: &RecordBatch,
    right: &RecordBatch,
    table: &str,
    on: &[JoinKey<'_>],
) -> Result<Joined> {
    let mut left_keys: Vec<ArrayRef> = Vec::with_capacity(on.len());
    let mut right_keys: Vec<ArrayRef> = Vec::with_capacity(on.len());

    for key in on {
        let l = column(left, table, key.left)?;
        let r = column(right, table, key.right)?;
        let common = common_key_type(l.data_type(), r.data_type());
        left_keys.push(normalize_zero(cast(l.as_ref(), &common)?));
        right_keys.push(normalize_zero(cast(r.as_ref(), &common)?));
    }

    let sort_fields: Vec<SortField> = left_keys
        .iter()
        .map(|k| SortField::new(k.data_type().clone()))
        .collect();
    let converter = RowConverter::new(sort_fields)?;
    let left_rows = converter.convert_columns(&left_keys)?;
    let right_rows = converter.convert_columns(&right_keys)?;

    let mut build: HashMap<Row<'_>, Vec<u32>> = HashMap::new();
    for j in 0..right.num_rows() {
        if has_null_key(&right_keys, j) {
            continue;
        }
        build.entry(right_rows.row(j)).or_default().push(j as u32);
    }

    let mut left_idx: Vec<u32> = Vec::new();
    let mut right_idx: Vec<u32> = Vec::new();
    for i in 0..left.num_rows() {
        if has_null_key(&left_keys, i) {
            continue;
        }
        if let Some(matches) = build.get(&left_rows.row(i)) {
            for &j in matches {
                left_idx.push(i as u32);
                right_idx.push(j);
            }
        }
    }

    Ok(Joined {
        left: take_record_batch(left, &UInt32Array::from(left_idx))?,
        right: take_record_batch(right, &UInt32Array::from(right_idx))?,
    })
}

fn has_null_key(keys: &[ArrayRef], row: usize) -> bool {
    keys.iter().any(|k| k.is_null(row))
}

/// Rewrite `-0.0` as `0.0`; the row format otherwise keeps them distinct
fn normalize_zero(key: ArrayRef) -> ArrayRef {
    match key.data_type().clone() {
        DataType::Float64 => Arc::new(
            key.as_primitive::<Float64Type>()
                .unary::<_, Float64Type>(|v| v + 0.0),
        ),
        DataType::Float32 => Arc::new(
            key.as_primitive::<Float32Type>()
                .unary::<_, Float32Type>(|v| v + 0.0),
        ),
        _ => key,
    }
}

fn common_key_type(left: &DataType, right: &DataType) -> DataType {
    if left == right {
        left.clone()
    } else if left.is_numeric() && right.is_numeric() {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}
