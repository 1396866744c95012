//! Raw data ingestion for the restaurant ETL.
//!
//! This crate provides:
//! - **csv**: Polars-backed CSV reading with schema inference
//! - **jsonl**: JSON-lines reading into semi-structured tables
//! - **loader**: the [`Loader`] trait and a directory-backed implementation

pub mod csv;
pub mod error;
pub mod jsonl;
pub mod loader;

pub use csv::{INFER_SCHEMA_ROWS, read_csv};
pub use error::{IngestError, Result};
pub use jsonl::read_json_lines;
pub use loader::{CUSTOMERS_FILE, DirectoryLoader, Loader, ORDERS_FILE, TICKETS_FILE};
