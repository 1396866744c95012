use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series, TimeUnit};
use resto_common::timestamp_micros;

use super::dedupe_then_drop_missing;
use crate::datetime::parse_timestamp;
use crate::error::{Result, TransformError};

/// Identifier column as delivered by the source system.
pub const RAW_ID: &str = "id";
/// Identifier column of cleaned orders.
pub const ORDER_ID: &str = "order_id";
/// Order timestamp column.
pub const ORDERED_AT: &str = "ordered_at";

/// Clean raw order records.
///
/// Renames `id` to `order_id`, removes duplicate and incomplete rows, then
/// parses `ordered_at` into a `Datetime[μs]` column. Other columns keep
/// their type.
pub fn clean_orders(raw: &DataFrame) -> Result<DataFrame> {
    if raw.get_column_index(ORDERED_AT).is_none() {
        return Err(TransformError::MissingColumn(ORDERED_AT.to_string()));
    }
    let renamed = rename_id(raw)?;
    let mut cleaned = dedupe_then_drop_missing(&renamed, "orders")?;
    let ordered_at = timestamp_column(cleaned.column(ORDERED_AT)?)?;
    cleaned.with_column(ordered_at)?;
    Ok(cleaned)
}

fn rename_id(raw: &DataFrame) -> Result<DataFrame> {
    if raw.get_column_index(RAW_ID).is_none() {
        return Ok(raw.clone());
    }
    if raw.get_column_index(ORDER_ID).is_some() {
        return Err(TransformError::DuplicateColumn(ORDER_ID.to_string()));
    }
    let mut renamed = raw.clone();
    renamed.rename(RAW_ID, ORDER_ID.into())?;
    Ok(renamed)
}

fn timestamp_column(column: &Column) -> Result<Column> {
    let target = DataType::Datetime(TimeUnit::Microseconds, None);
    match column.dtype() {
        DataType::Datetime(_, _) => Ok(column.clone()),
        DataType::Date | DataType::Null => Ok(column.cast(&target)?),
        DataType::String => {
            let values = column.str()?;
            let mut micros: Vec<Option<i64>> = Vec::with_capacity(values.len());
            for (row, value) in values.into_iter().enumerate() {
                let parsed = match value {
                    None => None,
                    Some(text) => {
                        let ts = parse_timestamp(text).ok_or_else(|| {
                            TransformError::UnparseableTimestamp {
                                column: column.name().to_string(),
                                row,
                                value: text.to_string(),
                            }
                        })?;
                        Some(timestamp_micros(&ts))
                    }
                };
                micros.push(parsed);
            }
            Ok(Series::new(column.name().clone(), micros)
                .cast(&target)?
                .into_column())
        }
        other => Err(TransformError::UnsupportedType {
            column: column.name().to_string(),
            dtype: other.to_string(),
        }),
    }
}
