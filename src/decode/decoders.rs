//! Decoder implementations
//!
//! Each decoder handles a specific file layout.

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

// ============================================================================
// JSON Decoder
// ============================================================================

/// Whole-document JSON decoder (an object, or an array of objects)
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, path: &str, body: &str) -> Result<Vec<JsonObject>> {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: JsonValue = serde_json::from_str(body)
            .map_err(|e| Error::decode(path, format!("Failed to parse JSON: {e}")))?;

        match value {
            JsonValue::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| into_object(item).ok_or_else(|| not_an_object(path, i + 1)))
                .collect(),
            other => into_object(other)
                .map(|obj| vec![obj])
                .ok_or_else(|| not_an_object(path, 1)),
        }
    }
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one JSON object per line)
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, path: &str, body: &str) -> Result<Vec<JsonObject>> {
        let mut records = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: JsonValue = serde_json::from_str(line).map_err(|e| {
                Error::decode(
                    path,
                    format!("Failed to parse JSONL at line {}: {e}", line_num + 1),
                )
            })?;

            records.push(into_object(value).ok_or_else(|| not_an_object(path, line_num + 1))?);
        }

        Ok(records)
    }
}

// ============================================================================
// Auto Decoder
// ============================================================================

/// JSON Lines with a fallback to a single (possibly pretty-printed) document
#[derive(Debug, Clone, Default)]
pub struct AutoDecoder {
    lines: JsonlDecoder,
    document: JsonDecoder,
}

impl AutoDecoder {
    /// Create a new auto-detecting decoder
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordDecoder for AutoDecoder {
    fn decode(&self, path: &str, body: &str) -> Result<Vec<JsonObject>> {
        match self.lines.decode(path, body) {
            Ok(records) => Ok(records),
            Err(lines_err) => self.document.decode(path, body).map_err(|_| lines_err),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn into_object(value: JsonValue) -> Option<JsonObject> {
    match value {
        JsonValue::Object(obj) => Some(obj),
        _ => None,
    }
}

fn not_an_object(path: &str, record: usize) -> Error {
    Error::decode(path, format!("Record {record} is not a JSON object"))
}
