//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use crate::types::JsonObject;

/// Trait for decoding input file bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the file body into records; `path` is used in error messages
    fn decode(&self, path: &str, body: &str) -> Result<Vec<JsonObject>>;
}
