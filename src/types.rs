//! Common types used throughout songplay-lake
//!
//! This module contains shared type definitions, type aliases,
//! and the descriptions of the five output tables.

use serde::Deserialize;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Table Specs
// ============================================================================

/// Name, output sub-path and partition columns of a derived table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Logical table name used in logs and errors
    pub name: &'static str,
    /// Sub-path below the output root
    pub path: &'static str,
    /// Partition columns, outermost directory first
    pub partition_by: &'static [&'static str],
}

impl TableSpec {
    /// Song dimension
    pub const SONGS: TableSpec = TableSpec {
        name: "songs",
        path: "song",
        partition_by: &["year", "artist_id"],
    };

    /// Artist dimension
    pub const ARTISTS: TableSpec = TableSpec {
        name: "artists",
        path: "artist",
        partition_by: &[],
    };

    /// User dimension
    pub const USERS: TableSpec = TableSpec {
        name: "users",
        path: "user",
        partition_by: &[],
    };

    /// Time dimension
    pub const TIME: TableSpec = TableSpec {
        name: "time",
        path: "time",
        partition_by: &["year", "month"],
    };

    /// Songplay fact table
    pub const SONGPLAYS: TableSpec = TableSpec {
        name: "songplays",
        path: "songplay",
        partition_by: &["year", "month"],
    };

    /// All tables in the order the pipeline writes them
    pub const ALL: [TableSpec; 5] = [
        Self::SONGS,
        Self::ARTISTS,
        Self::USERS,
        Self::TIME,
        Self::SONGPLAYS,
    ];

    /// Whether the table is written as a Hive-style directory tree
    pub fn is_partitioned(&self) -> bool {
        !self.partition_by.is_empty()
    }
}

impl std::fmt::Display for TableSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

// ============================================================================
// Compression
// ============================================================================

/// Parquet compression codec selectable from the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionCodec {
    /// Snappy (default, matches the usual data-lake layout)
    #[default]
    Snappy,
    /// Zstandard
    Zstd,
    /// Gzip
    Gzip,
    /// No compression
    None,
}
