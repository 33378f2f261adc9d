//! Tests for transform module

use super::*;
use crate::error::Error;
use crate::schema::{infer_schema, json_to_arrow};
use crate::types::{JsonObject, JsonValue};
use arrow::array::{Array, AsArray, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Int32Type, Int64Type, TimeUnit};
use arrow::record_batch::RecordBatch;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;

fn records(values: Vec<JsonValue>) -> RecordBatch {
    let objects: Vec<JsonObject> = values
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect();
    json_to_arrow(&objects, &infer_schema(&objects)).unwrap()
}

fn event(page: &str, ts: i64, user: &str, level: &str) -> JsonValue {
    json!({
        "artist": "Elena",
        "auth": "Logged In",
        "firstName": "Lily",
        "gender": "F",
        "itemInSession": 0,
        "lastName": "Koch",
        "length": 269.58322,
        "level": level,
        "location": "Chicago-Naperville-Elgin, IL-IN-WI",
        "method": "PUT",
        "page": page,
        "sessionId": 818,
        "song": "Setanta matins",
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0",
        "userId": user
    })
}

fn song(song_id: &str, title: &str, duration: f64) -> JsonValue {
    json!({
        "num_songs": 1,
        "artist_id": "AR5KOSW1187FB35FF4",
        "artist_latitude": 49.80388,
        "artist_longitude": 15.47491,
        "artist_location": "Dubai UAE",
        "artist_name": "Elena",
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 0
    })
}

fn strings(batch: &RecordBatch, name: &str) -> Vec<String> {
    batch
        .column_by_name(name)
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap()
        .iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

fn i32_at(batch: &RecordBatch, name: &str, row: usize) -> i32 {
    batch
        .column_by_name(name)
        .unwrap()
        .as_primitive::<Int32Type>()
        .value(row)
}

fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema_ref()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

// ============================================================================
// Song Catalog Tests
// ============================================================================

#[test]
fn test_songs_table_distinct_rows() {
    let catalog = records(vec![
        song("SOZCTXZ12AB0182364", "Setanta matins", 269.58322),
        song("SOZCTXZ12AB0182364", "Setanta matins", 269.58322),
        song("SOUPIRU12A6D4FA1E1", "Der Kleine Dompfaff", 152.92036),
    ]);

    let songs = songs_table(&catalog).unwrap();
    assert_eq!(songs.num_rows(), 2);
    assert_eq!(
        column_names(&songs),
        vec!["song_id", "title", "artist_id", "year", "duration"]
    );
}

#[test]
fn test_artists_table_distinct_rows() {
    let catalog = records(vec![
        song("S1", "A", 1.0),
        song("S2", "B", 2.0),
        song("S3", "C", 3.0),
    ]);

    let artists = artists_table(&catalog).unwrap();
    assert_eq!(artists.num_rows(), 1);
    assert_eq!(
        column_names(&artists),
        vec![
            "artist_id",
            "artist_name",
            "artist_location",
            "artist_latitude",
            "artist_longitude"
        ]
    );
}

#[test]
fn test_songs_table_missing_column_is_fatal() {
    let catalog = records(vec![json!({"song_id": "S1", "title": "A"})]);
    let err = songs_table(&catalog).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { ref table, .. } if table == "songs"));
}

#[test]
fn test_songs_table_field_missing_in_some_records_is_null() {
    let catalog = records(vec![
        song("S1", "A", 1.0),
        json!({"song_id": "S2", "title": "B", "artist_id": "AR"}),
    ]);
    let songs = songs_table(&catalog).unwrap();
    assert_eq!(songs.num_rows(), 2);
    assert!(songs.column_by_name("duration").unwrap().is_null(1));
}

// ============================================================================
// Event Log Tests
// ============================================================================

#[test]
fn test_song_plays_filters_pages() {
    let events = records(vec![
        event("NextSong", 1_541_121_934_796, "10", "free"),
        event("PageView", 1_541_121_934_797, "11", "free"),
        event("Home", 1_541_121_934_798, "12", "free"),
    ]);

    let plays = song_plays(&events).unwrap();
    assert_eq!(plays.num_rows(), 1);
    assert_eq!(strings(&plays, "userId"), vec!["10"]);
}

#[test]
fn test_page_view_contributes_nothing() {
    let events = records(vec![event("PageView", 1_541_121_934_796, "10", "free")]);
    let catalog = records(vec![song("SOZCTXZ12AB0182364", "Setanta matins", 269.58322)]);

    let plays = with_timestamps(&song_plays(&events).unwrap()).unwrap();
    assert_eq!(users_table(&plays).unwrap().num_rows(), 0);
    assert_eq!(time_table(&plays).unwrap().num_rows(), 0);
    assert_eq!(songplays_table(&plays, &catalog).unwrap().num_rows(), 0);
}

#[test]
fn test_users_table_duplicates_collapse() {
    let events = records(vec![
        event("NextSong", 1_541_121_934_796, "10", "free"),
        event("NextSong", 1_541_121_999_000, "10", "free"),
    ]);

    let users = users_table(&song_plays(&events).unwrap()).unwrap();
    assert_eq!(users.num_rows(), 1);
    assert_eq!(
        column_names(&users),
        vec!["user_id", "first_name", "last_name", "gender", "level"]
    );
}

#[test]
fn test_users_table_level_change_keeps_both_rows() {
    let events = records(vec![
        event("NextSong", 1_541_121_934_796, "10", "free"),
        event("NextSong", 1_541_121_999_000, "10", "paid"),
    ]);

    let users = users_table(&song_plays(&events).unwrap()).unwrap();
    assert_eq!(users.num_rows(), 2);
    assert_eq!(strings(&users, "level"), vec!["free", "paid"]);
}

// ============================================================================
// Timestamp Tests
// ============================================================================

#[test_case(1_541_121_934_796, 1_541_121_934 ; "truncates millis")]
#[test_case(1_541_121_934_000, 1_541_121_934 ; "exact second")]
#[test_case(999, 0 ; "below one second")]
#[test_case(-1, -1 ; "negative floors")]
fn test_epoch_seconds(ts: i64, expected: i64) {
    let input: Arc<dyn Array> = Arc::new(Int64Array::from(vec![ts]));
    let seconds = epoch_seconds(&input).unwrap();
    assert_eq!(seconds.value(0), expected);
}

#[test]
fn test_epoch_seconds_keeps_nulls() {
    let input: Arc<dyn Array> = Arc::new(Int64Array::from(vec![None, Some(5_000)]));
    let seconds = epoch_seconds(&input).unwrap();
    assert!(seconds.is_null(0));
    assert_eq!(seconds.value(1), 5);
}

#[test]
fn test_calendar_from_epoch_seconds() {
    // 2018-11-02T01:25:34Z, a Friday in ISO week 44
    let cal = Calendar::from_epoch_seconds(1_541_121_934).unwrap();
    assert_eq!(
        cal,
        Calendar {
            year: 2018,
            month: 11,
            day: 2,
            hour: 1,
            week: 44,
            weekday: 6,
        }
    );
}

#[test]
fn test_calendar_iso_week_at_year_boundary() {
    // 2018-12-31 is a Monday in ISO week 1 of 2019
    let cal = Calendar::from_epoch_seconds(1_546_214_400).unwrap();
    assert_eq!((cal.year, cal.month, cal.day), (2018, 12, 31));
    assert_eq!(cal.week, 1);
    assert_eq!(cal.weekday, 2);
}

#[test]
fn test_with_timestamps_adds_columns() {
    let events = records(vec![event("NextSong", 1_541_121_934_796, "10", "free")]);
    let plays = with_timestamps(&song_plays(&events).unwrap()).unwrap();

    let start_time = plays
        .column_by_name("start_time")
        .unwrap()
        .as_primitive::<Int64Type>();
    assert_eq!(start_time.value(0), 1_541_121_934);

    let datetime = plays.column_by_name("datetime").unwrap();
    assert_eq!(
        datetime.data_type(),
        &DataType::Timestamp(TimeUnit::Second, Some(UTC.into()))
    );
}

#[test]
fn test_time_table() {
    let events = records(vec![
        event("NextSong", 1_541_121_934_796, "10", "free"),
        event("NextSong", 1_541_121_934_796, "11", "paid"),
        event("NextSong", 1_541_122_241_796, "10", "free"),
    ]);
    let plays = with_timestamps(&song_plays(&events).unwrap()).unwrap();

    let time = time_table(&plays).unwrap();
    assert_eq!(time.num_rows(), 2);
    assert_eq!(
        column_names(&time),
        vec!["ts", "start_time", "hour", "day", "week", "month", "year", "weekday"]
    );
    assert_eq!(i32_at(&time, "year", 0), 2018);
    assert_eq!(i32_at(&time, "month", 0), 11);
    assert_eq!(i32_at(&time, "day", 0), 2);
    assert_eq!(i32_at(&time, "hour", 0), 1);
    assert!(time.column_by_name("week").unwrap().as_any().is::<Int32Array>());
}

// ============================================================================
// Songplays Tests
// ============================================================================

#[test]
fn test_songplays_scenario_single_match() {
    let events = records(vec![event("NextSong", 1_541_121_934_796, "10", "free")]);
    let catalog = records(vec![song("SOZCTXZ12AB0182364", "Setanta matins", 269.58322)]);

    let plays = with_timestamps(&song_plays(&events).unwrap()).unwrap();
    let songplays = songplays_table(&plays, &catalog).unwrap();

    assert_eq!(songplays.num_rows(), 1);
    assert_eq!(
        column_names(&songplays),
        vec![
            "datetime",
            "user_id",
            "level",
            "song_id",
            "artist_id",
            "session_id",
            "location",
            "user_agent",
            "year",
            "month"
        ]
    );
    assert_eq!(strings(&songplays, "song_id"), vec!["SOZCTXZ12AB0182364"]);
    assert_eq!(strings(&songplays, "artist_id"), vec!["AR5KOSW1187FB35FF4"]);
    assert_eq!(i32_at(&songplays, "year", 0), 2018);
    assert_eq!(i32_at(&songplays, "month", 0), 11);
}

#[test]
fn test_songplays_length_must_match_exactly() {
    let events = records(vec![event("NextSong", 1_541_121_934_796, "10", "free")]);
    let catalog = records(vec![song("SOZCTXZ12AB0182364", "Setanta matins", 269.5832)]);

    let plays = with_timestamps(&song_plays(&events).unwrap()).unwrap();
    assert_eq!(songplays_table(&plays, &catalog).unwrap().num_rows(), 0);
}

#[test]
fn test_songplays_title_is_case_sensitive() {
    let events = records(vec![event("NextSong", 1_541_121_934_796, "10", "free")]);
    let catalog = records(vec![song("SOZCTXZ12AB0182364", "setanta matins", 269.58322)]);

    let plays = with_timestamps(&song_plays(&events).unwrap()).unwrap();
    assert_eq!(songplays_table(&plays, &catalog).unwrap().num_rows(), 0);
}

#[test]
fn test_songplays_bounded_by_plays_and_distinct() {
    let events = records(vec![
        event("NextSong", 1_541_121_934_796, "10", "free"),
        event("NextSong", 1_541_121_934_796, "10", "free"),
        event("NextSong", 1_541_121_999_796, "10", "free"),
    ]);
    let catalog = records(vec![song("SOZCTXZ12AB0182364", "Setanta matins", 269.58322)]);

    let plays = with_timestamps(&song_plays(&events).unwrap()).unwrap();
    let songplays = songplays_table(&plays, &catalog).unwrap();
    assert!(songplays.num_rows() <= plays.num_rows());
    assert_eq!(songplays.num_rows(), 2);
}
