//! JSON-lines reading for semi-structured exports.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use resto_model::{RawTable, Value};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads one JSON object per line into a [`RawTable`].
///
/// Blank lines are skipped. Line numbers in errors are 1-based. Object key
/// order is kept, so nested values reach the normalizer as written.
pub fn read_json_lines(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let reader = BufReader::new(file);

    let mut table = RawTable::new();
    for (idx, line_result) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line_result.map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let text = line.trim().trim_start_matches('\u{feff}');
        if text.is_empty() {
            continue;
        }
        let record: serde_json::Value =
            serde_json::from_str(text).map_err(|e| IngestError::JsonLine {
                path: path.to_path_buf(),
                line: line_number,
                source: e,
            })?;
        let serde_json::Value::Object(map) = record else {
            return Err(IngestError::NotAnObject {
                path: path.to_path_buf(),
                line: line_number,
            });
        };
        table.push_record(map.into_iter().map(|(k, v)| (k, Value::from(v))));
    }

    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "read json lines"
    );
    Ok(table)
}
