use polars::prelude::DataFrame;

use super::dedupe_then_drop_missing;
use crate::error::Result;

/// Clean raw customer records.
///
/// Columns are left untouched; only duplicate and incomplete rows go.
pub fn clean_customers(raw: &DataFrame) -> Result<DataFrame> {
    dedupe_then_drop_missing(raw, "customers")
}
