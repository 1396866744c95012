//! Row-oriented table for semi-structured sources.
//!
//! Tabular sources load straight into Polars frames. Ticket exports are
//! JSON lines whose cells may hold nested objects or lists that a typed
//! column cannot carry, so they land here first.

use crate::error::{ModelError, Result};
use crate::value::Value;

/// Ordered rows of [`Value`] cells with a shared, ordered column list.
///
/// Columns are the union of record keys in first-seen order. A record that
/// lacks a column holds [`Value::Null`] in that position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Values of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Append a positional row; its width must match the column list.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Keep only the rows for which `keep` returns true, preserving order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Value]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Append a keyed record, registering unseen keys as new columns.
    ///
    /// Existing rows are back-filled with nulls for new columns. When a key
    /// repeats within one record the last value wins.
    pub fn push_record<I, K>(&mut self, record: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut row = vec![Value::Null; self.columns.len()];
        for (key, value) in record {
            let key = key.into();
            match self.column_index(&key) {
                Some(idx) => row[idx] = value,
                None => {
                    self.columns.push(key);
                    for existing in &mut self.rows {
                        existing.push(Value::Null);
                    }
                    row.push(value);
                }
            }
        }
        self.rows.push(row);
    }

    /// Build a table from parsed JSON records (one object per row).
    pub fn from_json_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        let mut table = Self::new();
        for (index, record) in records.into_iter().enumerate() {
            let serde_json::Value::Object(map) = record else {
                return Err(ModelError::NotAnObject { index });
            };
            table.push_record(map.into_iter().map(|(k, v)| (k, Value::from(v))));
        }
        Ok(table)
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Value>>) {
        (self.columns, self.rows)
    }
}
