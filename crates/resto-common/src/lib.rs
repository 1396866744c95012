//! Shared utilities for the restaurant ETL crates.
//!
//! This crate provides common utilities used across the workspace,
//! including Polars `AnyValue` helpers and whole-row frame operations.

pub mod polars;
pub mod rows;

// Re-export commonly used functions at crate root for convenience
pub use crate::polars::{
    any_to_value, date_from_epoch_days, datetime_from_epoch, is_missing, timestamp_micros,
};
pub use crate::rows::{
    count_distinct_rows, count_rows_with_missing, dedupe_raw_rows, dedupe_rows,
    drop_missing_raw_rows, drop_missing_rows, frame_to_raw_table, raw_row_key, row_has_missing,
    row_key, value_is_missing,
};
