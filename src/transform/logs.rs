//! Event-log derived tables

use super::time::{epoch_seconds, to_datetime, CalendarColumns};
use crate::error::Result;
use crate::table::{
    column, distinct, filter_eq, inner_join, select, select_as, with_columns, JoinKey, Side,
};
use crate::types::TableSpec;
use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// `page` value of a playback event
pub const NEXT_SONG: &str = "NextSong";

/// Label used in errors raised while filtering raw events
const EVENTS: &str = "song plays";

/// Event log columns renamed into the `users` table
pub const USER_COLUMNS: [(&str, &str); 5] = [
    ("userId", "user_id"),
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("gender", "gender"),
    ("level", "level"),
];

/// `(song, artist, length)` of an event must equal `(title, artist_name, duration)`
pub const SONGPLAY_KEYS: [JoinKey<'static>; 3] = [
    JoinKey::new("song", "title"),
    JoinKey::new("artist", "artist_name"),
    JoinKey::new("length", "duration"),
];

/// Keep only playback events
pub fn song_plays(events: &RecordBatch) -> Result<RecordBatch> {
    filter_eq(events, EVENTS, "page", NEXT_SONG)
}

/// Distinct user rows of the playback events
///
/// Rows are compared in full, so a user seen with two levels yields two rows.
pub fn users_table(plays: &RecordBatch) -> Result<RecordBatch> {
    distinct(&select_as(plays, TableSpec::USERS.name, &USER_COLUMNS)?)
}

/// Attach `start_time` (epoch seconds) and `datetime` (UTC) derived from `ts`
pub fn with_timestamps(plays: &RecordBatch) -> Result<RecordBatch> {
    let start_time = epoch_seconds(column(plays, EVENTS, "ts")?)?;
    let datetime = to_datetime(&start_time);

    with_columns(
        plays,
        vec![
            ("start_time", Arc::new(start_time) as ArrayRef),
            ("datetime", Arc::new(datetime) as ArrayRef),
        ],
    )
}

/// Distinct time rows of the playback events (expects `with_timestamps` columns)
pub fn time_table(plays: &RecordBatch) -> Result<RecordBatch> {
    let table = TableSpec::TIME.name;
    let calendar = CalendarColumns::from_datetime(column(plays, table, "datetime")?)?;
    let base = select(plays, table, &["ts", "start_time"])?;

    let time = with_columns(
        &base,
        vec![
            ("hour", calendar.hour),
            ("day", calendar.day),
            ("week", calendar.week),
            ("month", calendar.month),
            ("year", calendar.year),
            ("weekday", calendar.weekday),
        ],
    )?;
    distinct(&time)
}

/// Distinct songplay facts: playback events matched to catalog songs
///
/// Expects `with_timestamps` columns on `plays`. Events without an exact
/// `(song, artist, length)` match in `songs` are dropped.
pub fn songplays_table(plays: &RecordBatch, songs: &RecordBatch) -> Result<RecordBatch> {
    let table = TableSpec::SONGPLAYS.name;
    let joined = inner_join(plays, songs, table, &SONGPLAY_KEYS)?;

    let facts = joined.project(
        table,
        &[
            (Side::Left, "datetime", "datetime"),
            (Side::Left, "userId", "user_id"),
            (Side::Left, "level", "level"),
            (Side::Right, "song_id", "song_id"),
            (Side::Right, "artist_id", "artist_id"),
            (Side::Left, "sessionId", "session_id"),
            (Side::Left, "location", "location"),
            (Side::Left, "userAgent", "user_agent"),
        ],
    )?;

    let calendar = CalendarColumns::from_datetime(column(&facts, table, "datetime")?)?;
    let facts = with_columns(
        &facts,
        vec![("year", calendar.year), ("month", calendar.month)],
    )?;
    distinct(&facts)
}
