//! Data model shared across the restaurant ETL crates.
//!
//! - **value**: cell values, including nested objects and lists
//! - **raw_table**: row-oriented table for semi-structured sources
//! - **dataset**: logical dataset names and their layers

pub mod dataset;
pub mod error;
pub mod raw_table;
pub mod value;

pub use dataset::{Dataset, Layer};
pub use error::{ModelError, Result};
pub use raw_table::RawTable;
pub use value::{TIMESTAMP_FORMAT, Value, format_timestamp};
