//! Schema inference module
//!
//! Turns decoded JSON records into Arrow record batches.
//!
//! # Features
//!
//! - **Type Inference**: Infers Arrow types from JSON values
//! - **Type Merging**: Int64 + Float64 widen to Float64, conflicts fall back to Utf8
//! - **Missing Fields**: Fields absent from a record become nulls
//! - **Input Contracts**: Declared schemas for empty inputs

mod contract;
mod inference;

pub use contract::{log_record_schema, song_record_schema};
pub use inference::{infer_schema, json_to_arrow};
