//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue` types:
//! missing-value checks, epoch conversions and conversion to model values.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::{AnyValue, TimeUnit};
use resto_model::Value;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// True for nulls and floating NaN, both of which count as missing data.
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Converts a Polars `AnyValue` into a model [`Value`].
///
/// Temporal values become [`Value::Timestamp`]; types without a model
/// counterpart fall back to their string form.
pub fn any_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::Int(i64::from(v)),
        AnyValue::Int16(v) => Value::Int(i64::from(v)),
        AnyValue::Int32(v) => Value::Int(i64::from(v)),
        AnyValue::Int64(v) => Value::Int(v),
        AnyValue::UInt8(v) => Value::Int(i64::from(v)),
        AnyValue::UInt16(v) => Value::Int(i64::from(v)),
        AnyValue::UInt32(v) => Value::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Value::Float(v as f64), Value::Int),
        AnyValue::Float32(v) => Value::Float(f64::from(v)),
        AnyValue::Float64(v) => Value::Float(v),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Date(days) => date_from_epoch_days(days)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map_or(Value::Null, Value::Timestamp),
        AnyValue::Datetime(v, unit, _) => {
            datetime_from_epoch(v, unit).map_or(Value::Null, Value::Timestamp)
        }
        other => Value::String(other.to_string()),
    }
}

/// Interprets an epoch offset in the given unit as a naive UTC timestamp.
pub fn datetime_from_epoch(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let dt = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    };
    dt.map(|dt| dt.naive_utc())
}

/// Microseconds since the Unix epoch, the physical value of `Datetime[μs]`.
pub fn timestamp_micros(ts: &NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_micros()
}

/// Converts days since the Unix epoch (the physical value of `Date`) to a date.
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}
