//! Input decoder module
//!
//! Supports: JSON Lines, single JSON documents, and auto-detection between them
//!
//! # Overview
//!
//! Song metadata ships as one JSON object per file while event logs are
//! JSON Lines. Every decoder turns a file body into a list of JSON objects.

mod decoders;
mod types;

pub use decoders::{AutoDecoder, JsonDecoder, JsonlDecoder};
pub use types::RecordDecoder;
