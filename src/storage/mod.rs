//! Storage module
//!
//! Read and write access to the input and output base locations.
//!
//! # Overview
//!
//! This module provides:
//! - S3-compatible and local filesystem locations built from explicit credentials
//! - Path glob expansion for input discovery
//! - Prefix deletion for overwrite semantics

mod glob;
mod location;

pub use glob::GlobPattern;
pub use location::{StorageLocation, StorageOptions};

#[cfg(test)]
mod tests;
