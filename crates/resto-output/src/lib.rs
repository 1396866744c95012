//! Output generation for silver and gold tables.
//!
//! Tables are written under one directory per layer, either as Parquet
//! (the default) or CSV.

pub mod error;
pub mod format;
pub mod writer;

pub use error::{OutputError, Result};
pub use format::OutputFormat;
pub use writer::{DirectoryWriter, Writer};
