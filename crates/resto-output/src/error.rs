//! Error types for output generation.

use std::path::PathBuf;

use resto_model::Dataset;
use thiserror::Error;

/// Errors that can occur while persisting tables.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create an output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write an output file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars failed to encode the table.
    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Raw datasets are never written back.
    #[error("dataset '{0}' belongs to the bronze layer and is not written")]
    RawDataset(Dataset),

    /// Unknown output format name.
    #[error("unknown output format '{0}' (expected parquet or csv)")]
    UnknownFormat(String),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
