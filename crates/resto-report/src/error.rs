//! Error types for analytics.

use thiserror::Error;

/// Errors raised while deriving gold tables.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportError {
    /// An input table lacks a column the metric needs.
    #[error("column not found: {0}")]
    MissingColumn(String),

    /// A column expected to hold numbers has another type.
    #[error("column '{column}' is not numeric ({dtype})")]
    NonNumeric {
        /// Column name.
        column: String,
        /// Polars dtype as displayed.
        dtype: String,
    },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Result type for analytics.
pub type Result<T> = std::result::Result<T, ReportError>;
