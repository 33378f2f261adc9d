//! Pipeline types
//!
//! Run statistics for the pipeline.

use crate::output::WriteSummary;

/// What a pipeline run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// One entry per table, in write order
    pub tables: Vec<WriteSummary>,
    /// Song metadata records read
    pub song_records: usize,
    /// Event log records read
    pub log_records: usize,
    /// Events kept by the `NextSong` filter
    pub song_plays: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl PipelineReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a table write
    pub fn add_table(&mut self, summary: WriteSummary) {
        self.tables.push(summary);
    }

    /// Summary of the named table, if it was written
    pub fn table(&self, name: &str) -> Option<&WriteSummary> {
        self.tables.iter().find(|t| t.table == name)
    }

    /// Total rows written across all tables
    pub fn rows_written(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    /// Total Parquet files written across all tables
    pub fn files_written(&self) -> usize {
        self.tables.iter().map(|t| t.files).sum()
    }
}
