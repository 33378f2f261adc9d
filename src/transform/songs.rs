//! Song-catalog derived tables

use crate::error::Result;
use crate::table::{distinct, select};
use crate::types::TableSpec;
use arrow::record_batch::RecordBatch;

/// Columns of the `songs` table
pub const SONG_COLUMNS: [&str; 5] = ["song_id", "title", "artist_id", "year", "duration"];

/// Columns of the `artists` table
pub const ARTIST_COLUMNS: [&str; 5] = [
    "artist_id",
    "artist_name",
    "artist_location",
    "artist_latitude",
    "artist_longitude",
];

/// Distinct song rows of the catalog
pub fn songs_table(songs: &RecordBatch) -> Result<RecordBatch> {
    distinct(&select(songs, TableSpec::SONGS.name, &SONG_COLUMNS)?)
}

/// Distinct artist rows of the catalog
pub fn artists_table(songs: &RecordBatch) -> Result<RecordBatch> {
    distinct(&select(songs, TableSpec::ARTISTS.name, &ARTIST_COLUMNS)?)
}
