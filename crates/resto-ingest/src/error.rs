//! Error types for raw data ingestion.

use std::path::PathBuf;

use resto_model::Dataset;
use thiserror::Error;

/// Errors that can occur while loading raw datasets.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Data directory missing.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Source file missing.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A JSON-lines record is not valid JSON.
    #[error("invalid JSON at {path}:{line}: {source}")]
    JsonLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON-lines record is valid JSON but not an object.
    #[error("record at {path}:{line} is not a JSON object")]
    NotAnObject { path: PathBuf, line: usize },

    // === Catalog Errors ===
    /// The dataset is not a raw source, or has no tabular form.
    #[error("dataset '{dataset}' cannot be loaded as {form}")]
    UnsupportedDataset {
        dataset: Dataset,
        form: &'static str,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl IngestError {
    /// Classify an I/O error raised while opening `path`.
    pub(crate) fn open(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::NotAnObject {
            path: PathBuf::from("/data/tickets.jsonl"),
            line: 4,
        };
        assert_eq!(
            err.to_string(),
            "record at /data/tickets.jsonl:4 is not a JSON object"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }

    #[test]
    fn test_open_classifies_missing_files() {
        let path = std::path::Path::new("missing.csv");
        let err = IngestError::open(path, std::io::ErrorKind::NotFound.into());
        assert!(matches!(err, IngestError::FileNotFound { .. }));
        let err = IngestError::open(path, std::io::ErrorKind::PermissionDenied.into());
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
