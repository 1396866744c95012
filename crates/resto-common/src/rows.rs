//! Whole-row operations on DataFrames.
//!
//! Row equality here compares every column. Cells are keyed by their typed
//! value, so `1` and `"1"` never collide while two NaNs do. The same rules
//! apply to [`RawTable`] rows, where a column may mix kinds: there `1` and
//! `1.0` are equal but `true` and `"true"` are not. Every function borrows
//! its input and returns a new table.

use std::collections::HashSet;

use polars::prelude::{
    AnyValue, BooleanChunked, DataFrame, NewChunkedArray, PolarsError, PolarsResult,
};
use resto_model::{RawTable, Value};

use crate::polars::{any_to_value, is_missing, timestamp_micros};

// Largest magnitude at which every integer is an exact f64.
const MAX_EXACT_F64_INT: f64 = 9_007_199_254_740_992.0;

fn float_key(v: f64) -> String {
    if v.is_nan() {
        "f:NaN".to_string()
    } else if v == 0.0 {
        // -0.0 and 0.0 compare equal
        "f:0".to_string()
    } else {
        format!("f:{v:?}")
    }
}

fn cell_key(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => "null".to_string(),
        AnyValue::String(s) => format!("s:{s}"),
        AnyValue::StringOwned(s) => format!("s:{s}"),
        AnyValue::Float32(v) => float_key(f64::from(v)),
        AnyValue::Float64(v) => float_key(v),
        other => format!("{other:?}"),
    }
}

fn value_key(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("b:{b}"),
        Value::Int(i) => format!("n:{i}"),
        Value::Float(v) if v.fract() == 0.0 && v.abs() <= MAX_EXACT_F64_INT => {
            format!("n:{}", *v as i64)
        }
        Value::Float(v) => float_key(*v),
        Value::String(s) => format!("s:{s}"),
        Value::Timestamp(ts) => format!("t:{}", timestamp_micros(ts)),
        nested => format!("{nested:?}"),
    }
}

/// True for null and NaN cells.
pub fn value_is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Float(v) => v.is_nan(),
        _ => false,
    }
}

/// Equality key of one [`RawTable`] row across all columns.
pub fn raw_row_key(row: &[Value]) -> Vec<String> {
    row.iter().map(value_key).collect()
}

/// Remove raw rows that exactly duplicate an earlier row; the first occurrence wins.
pub fn dedupe_raw_rows(table: &RawTable) -> RawTable {
    let mut seen = HashSet::with_capacity(table.height());
    let mut out = table.clone();
    out.retain_rows(|row| seen.insert(raw_row_key(row)));
    tracing::debug!(
        rows = table.height(),
        removed = table.height() - out.height(),
        "dedupe raw rows"
    );
    out
}

/// Remove every raw row holding a null (or NaN) cell.
pub fn drop_missing_raw_rows(table: &RawTable) -> RawTable {
    let mut out = table.clone();
    out.retain_rows(|row| !row.iter().any(value_is_missing));
    tracing::debug!(
        rows = table.height(),
        removed = table.height() - out.height(),
        "drop raw rows with missing values"
    );
    out
}

/// Equality key of one row across all columns.
pub fn row_key(df: &DataFrame, idx: usize) -> PolarsResult<Vec<String>> {
    df.get_columns()
        .iter()
        .map(|column| column.get(idx).map(cell_key))
        .collect()
}

/// True when any cell of the row is null or NaN.
pub fn row_has_missing(df: &DataFrame, idx: usize) -> PolarsResult<bool> {
    for column in df.get_columns() {
        if is_missing(&column.get(idx)?) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn filter_rows(df: &DataFrame, keep: &[bool]) -> PolarsResult<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    df.filter(&mask)
}

/// Remove rows that exactly duplicate an earlier row; the first occurrence wins.
pub fn dedupe_rows(df: &DataFrame) -> PolarsResult<DataFrame> {
    if df.height() == 0 || df.width() == 0 {
        return Ok(df.clone());
    }
    let mut seen = HashSet::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        keep.push(seen.insert(row_key(df, idx)?));
    }
    let removed = keep.iter().filter(|kept| !**kept).count();
    tracing::debug!(rows = df.height(), removed, "dedupe rows");
    if removed == 0 {
        return Ok(df.clone());
    }
    filter_rows(df, &keep)
}

/// Remove every row holding a null (or NaN) in any column.
pub fn drop_missing_rows(df: &DataFrame) -> PolarsResult<DataFrame> {
    if df.height() == 0 || df.width() == 0 {
        return Ok(df.clone());
    }
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        keep.push(!row_has_missing(df, idx)?);
    }
    let removed = keep.iter().filter(|kept| !**kept).count();
    tracing::debug!(rows = df.height(), removed, "drop rows with missing values");
    if removed == 0 {
        return Ok(df.clone());
    }
    filter_rows(df, &keep)
}

/// Number of distinct full rows.
pub fn count_distinct_rows(df: &DataFrame) -> PolarsResult<usize> {
    let mut seen = HashSet::with_capacity(df.height());
    for idx in 0..df.height() {
        seen.insert(row_key(df, idx)?);
    }
    Ok(seen.len())
}

/// Number of rows with at least one null or NaN cell.
pub fn count_rows_with_missing(df: &DataFrame) -> PolarsResult<usize> {
    let mut count = 0;
    for idx in 0..df.height() {
        if row_has_missing(df, idx)? {
            count += 1;
        }
    }
    Ok(count)
}

/// Copy a frame into a [`RawTable`], one model value per cell.
pub fn frame_to_raw_table(df: &DataFrame) -> PolarsResult<RawTable> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let mut table = RawTable::with_columns(names);
    for idx in 0..df.height() {
        let mut row = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            row.push(any_to_value(column.get(idx)?));
        }
        table
            .push_row(row)
            .map_err(|err| PolarsError::ComputeError(err.to_string().into()))?;
    }
    Ok(table)
}
