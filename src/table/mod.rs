//! Relational primitives over Arrow record batches
//!
//! # Overview
//!
//! Record sets are immutable `RecordBatch`es. This module provides the
//! operations the pipeline is expressed in:
//! - Projection with optional renames (`select`, `select_as`)
//! - Selection by string equality (`filter_eq`)
//! - Deduplication by full-row equality (`distinct`)
//! - Typed inner equi-join (`inner_join`)
//!
//! A column referenced by name that the record set does not have is a
//! `MissingColumn` error naming the table being derived.

mod join;
mod ops;

pub use join::{inner_join, JoinKey, Joined, Side};
pub use ops::{column, distinct, filter_eq, index_of, select, select_as, with_columns};
