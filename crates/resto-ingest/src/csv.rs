//! CSV file reading.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Rows sampled when inferring column types.
pub const INFER_SCHEMA_ROWS: usize = 100;

/// Reads a CSV file with a single header row into a DataFrame.
///
/// Column types are inferred from the first [`INFER_SCHEMA_ROWS`] rows;
/// empty cells load as nulls.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv"
    );
    Ok(df)
}
