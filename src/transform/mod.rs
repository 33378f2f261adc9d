//! Star-schema transforms
//!
//! # Overview
//!
//! Pure functions from input record sets to the five output tables:
//! - `songs`, `artists` from song metadata
//! - `users`, `time`, `songplays` from playback events (`page = "NextSong"`)
//!
//! Every table is deduplicated by full-row equality, keeping first
//! occurrences, so output row order is deterministic.

mod logs;
mod songs;
mod time;

pub use logs::{
    song_plays, songplays_table, time_table, users_table, with_timestamps, NEXT_SONG,
    SONGPLAY_KEYS, USER_COLUMNS,
};
pub use songs::{artists_table, songs_table, ARTIST_COLUMNS, SONG_COLUMNS};
pub use time::{epoch_seconds, to_datetime, Calendar, CalendarColumns, UTC};

#[cfg(test)]
mod tests;
