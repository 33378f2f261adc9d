//! Timestamp decomposition
//!
//! Event timestamps are epoch milliseconds. `start_time` is the floor of
//! `ts / 1000` (epoch seconds) and `datetime` is that instant in UTC.

use crate::error::Result;
use arrow::array::{Array, ArrayRef, AsArray, Int32Array, Int64Array, TimestampSecondArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Int64Type, TimestampSecondType};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::sync::Arc;

/// Timezone attached to derived `datetime` columns
pub const UTC: &str = "UTC";

/// Calendar fields of one instant (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    pub year: i32,
    /// 1-12
    pub month: i32,
    /// Day of month
    pub day: i32,
    /// 0-23
    pub hour: i32,
    /// ISO 8601 week of year
    pub week: i32,
    /// 1 = Sunday ... 7 = Saturday
    pub weekday: i32,
}

impl Calendar {
    /// Decompose epoch seconds; `None` when out of chrono's range
    pub fn from_epoch_seconds(seconds: i64) -> Option<Self> {
        let dt: DateTime<Utc> = DateTime::from_timestamp(seconds, 0)?;
        Some(Self {
            year: dt.year(),
            month: dt.month() as i32,
            day: dt.day() as i32,
            hour: dt.hour() as i32,
            week: dt.iso_week().week() as i32,
            weekday: dt.weekday().number_from_sunday() as i32,
        })
    }
}

/// `floor(ts / 1000)` for every row; null stays null
pub fn epoch_seconds(ts: &ArrayRef) -> Result<Int64Array> {
    let millis = cast(ts.as_ref(), &DataType::Int64)?;
    Ok(millis
        .as_primitive::<Int64Type>()
        .iter()
        .map(|v| v.map(|ms| ms.div_euclid(1000)))
        .collect())
}

/// Interpret epoch seconds as UTC instants
pub fn to_datetime(start_time: &Int64Array) -> TimestampSecondArray {
    TimestampSecondArray::new(start_time.values().clone(), start_time.nulls().cloned())
        .with_timezone(UTC)
}

/// Calendar columns derived from a `datetime` column
#[derive(Debug, Clone)]
pub struct CalendarColumns {
    pub year: ArrayRef,
    pub month: ArrayRef,
    pub day: ArrayRef,
    pub hour: ArrayRef,
    pub week: ArrayRef,
    pub weekday: ArrayRef,
}

impl CalendarColumns {
    /// Decompose every instant of `datetime` (seconds precision, UTC)
    pub fn from_datetime(datetime: &ArrayRef) -> Result<Self> {
        let seconds = cast(
            datetime.as_ref(),
            &DataType::Timestamp(arrow::datatypes::TimeUnit::Second, Some(UTC.into())),
        )?;
        let parts: Vec<Option<Calendar>> = seconds
            .as_primitive::<TimestampSecondType>()
            .iter()
            .map(|v| v.and_then(Calendar::from_epoch_seconds))
            .collect();

        let column = |f: fn(&Calendar) -> i32| -> ArrayRef {
            Arc::new(parts.iter().map(|p| p.as_ref().map(f)).collect::<Int32Array>())
        };

        Ok(Self {
            year: column(|c| c.year),
            month: column(|c| c.month),
            day: column(|c| c.day),
            hour: column(|c| c.hour),
            week: column(|c| c.week),
            weekday: column(|c| c.weekday),
        })
    }
}
