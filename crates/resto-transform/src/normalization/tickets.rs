use polars::prelude::DataFrame;
use resto_model::{RawTable, Value};
use tracing::debug;

use super::dedupe_then_drop_missing_raw;
use crate::error::Result;
use crate::frame_builder::build_frame;
use crate::serialize::encode;

/// Free-form ticket labels, delivered as a list or an object.
pub const TAGS: &str = "tags";

/// Text form of a `tags` cell that is not already a string.
///
/// Absent tags read `None` and booleans `True`/`False`, so the row survives
/// the missing-value pass and matches the labels of earlier exports.
fn tag_text(cell: &Value) -> String {
    match cell {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Float(v) if v.is_nan() => "nan".to_string(),
        Value::Float(v) if v.is_finite() => format!("{v:?}"),
        other => other.to_string(),
    }
}

/// Clean raw support-ticket records.
///
/// Nested cells are canonically encoded so they can take part in row
/// equality, and `tags` is always text. Duplicates and incomplete rows are
/// removed while cells still carry their source kind, so `7` and `"7"` stay
/// distinct rows even when their column is later rendered as text.
pub fn clean_tickets(raw: &RawTable) -> Result<DataFrame> {
    let tags = raw.column_index(TAGS);
    let mut encoded = RawTable::with_columns(raw.columns().iter().cloned());
    let mut nested = 0usize;
    for row in raw.rows() {
        let cells = row
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                if cell.is_nested() {
                    nested += 1;
                }
                let cell = encode(cell);
                if Some(idx) == tags && cell.as_str().is_none() {
                    Value::String(tag_text(&cell))
                } else {
                    cell
                }
            })
            .collect();
        encoded.push_row(cells)?;
    }
    debug!(rows = raw.height(), nested, "encoded ticket cells");
    let cleaned = dedupe_then_drop_missing_raw(&encoded, "tickets");
    build_frame(&cleaned)
}
