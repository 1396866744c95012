//! Error types for silver-layer normalization.

use thiserror::Error;

/// Errors that can occur while cleaning a raw table.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// A column the transform depends on is absent.
    #[error("column not found: {0}")]
    MissingColumn(String),

    /// Renaming would produce two columns with the same name.
    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    /// A column has a type the transform cannot interpret.
    #[error("column '{column}' has unsupported type {dtype}")]
    UnsupportedType {
        /// Column name.
        column: String,
        /// Polars dtype as displayed.
        dtype: String,
    },

    /// A timestamp string matched none of the accepted formats.
    #[error("cannot parse {column} value '{value}' at row {row} as a timestamp")]
    UnparseableTimestamp {
        /// Column being parsed.
        column: String,
        /// Zero-based row index in the deduplicated, null-free table.
        row: usize,
        /// The offending value.
        value: String,
    },

    /// Raw table construction error.
    #[error(transparent)]
    Model(#[from] resto_model::ModelError),

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, TransformError>;
