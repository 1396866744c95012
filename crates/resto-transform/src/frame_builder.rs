//! DataFrame construction from semi-structured tables.
//!
//! Each column gets the narrowest type that holds all of its non-null
//! cells. Columns mixing incompatible kinds fall back to strings, as do
//! float columns holding an integer beyond 2^53, which f64 cannot carry.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series, TimeUnit};
use resto_common::timestamp_micros;
use resto_model::{RawTable, Value};

use crate::error::Result;

const MAX_EXACT_F64_INT: u64 = 1 << 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Empty,
    Bool,
    Int,
    /// Integers, at least one of them too large for an exact f64.
    WideInt,
    Float,
    Text,
    Timestamp,
    Mixed,
}

fn cell_kind(value: &Value) -> Option<ColumnKind> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(ColumnKind::Bool),
        Value::Int(i) if i.unsigned_abs() > MAX_EXACT_F64_INT => Some(ColumnKind::WideInt),
        Value::Int(_) => Some(ColumnKind::Int),
        Value::Float(_) => Some(ColumnKind::Float),
        Value::String(_) => Some(ColumnKind::Text),
        Value::Timestamp(_) => Some(ColumnKind::Timestamp),
        Value::Object(_) | Value::List(_) => Some(ColumnKind::Mixed),
    }
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a Value>) -> ColumnKind {
    let mut kind = ColumnKind::Empty;
    for next in cells.filter_map(cell_kind) {
        kind = match (kind, next) {
            (ColumnKind::Empty, next) => next,
            (current, next) if current == next => current,
            (ColumnKind::Int, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Int) => {
                ColumnKind::Float
            }
            (ColumnKind::Int, ColumnKind::WideInt) | (ColumnKind::WideInt, ColumnKind::Int) => {
                ColumnKind::WideInt
            }
            _ => ColumnKind::Mixed,
        };
    }
    kind
}

/// Build a typed column from model values.
pub fn column_from_values(name: &str, cells: &[Value]) -> Result<Column> {
    let column = match infer_kind(cells.iter()) {
        ColumnKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Value::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        ColumnKind::Int | ColumnKind::WideInt => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Value::Int(i) => Some(*i),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Value::Int(i) => Some(*i as f64),
                    Value::Float(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        ColumnKind::Timestamp => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Value::Timestamp(ts) => Some(timestamp_micros(ts)),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
                .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
                .into_column()
        }
        ColumnKind::Empty | ColumnKind::Text | ColumnKind::Mixed => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| (!cell.is_null()).then(|| cell.to_string()))
                .collect();
            Series::new(name.into(), values).into_column()
        }
    };
    Ok(column)
}

/// Build a DataFrame with one typed column per table column.
pub fn build_frame(table: &RawTable) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(table.width());
    for (idx, name) in table.columns().iter().enumerate() {
        let cells: Vec<Value> = table.rows().iter().map(|row| row[idx].clone()).collect();
        columns.push(column_from_values(name, &cells)?);
    }
    Ok(DataFrame::new(columns)?)
}
