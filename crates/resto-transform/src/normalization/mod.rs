//! Silver-layer cleaning for each raw source.
//!
//! Every cleaner removes exact-duplicate rows first (first occurrence kept)
//! and then drops rows holding a null or NaN in any column.

mod customers;
mod orders;
mod tickets;

pub use customers::clean_customers;
pub use orders::{ORDER_ID, ORDERED_AT, RAW_ID, clean_orders};
pub use tickets::{TAGS, clean_tickets};

use polars::prelude::DataFrame;
use resto_common::{dedupe_raw_rows, dedupe_rows, drop_missing_raw_rows, drop_missing_rows};
use resto_model::RawTable;
use tracing::debug;

use crate::error::Result;

pub(crate) fn dedupe_then_drop_missing(df: &DataFrame, source: &str) -> Result<DataFrame> {
    let deduped = dedupe_rows(df)?;
    let cleaned = drop_missing_rows(&deduped)?;
    debug!(
        source,
        rows_in = df.height(),
        duplicates = df.height() - deduped.height(),
        missing = deduped.height() - cleaned.height(),
        rows_out = cleaned.height(),
        "cleaned rows"
    );
    Ok(cleaned)
}

/// Row-table counterpart of [`dedupe_then_drop_missing`], for sources whose
/// columns may mix kinds before they are typed.
pub(crate) fn dedupe_then_drop_missing_raw(raw: &RawTable, source: &str) -> RawTable {
    let deduped = dedupe_raw_rows(raw);
    let cleaned = drop_missing_raw_rows(&deduped);
    debug!(
        source,
        rows_in = raw.height(),
        duplicates = raw.height() - deduped.height(),
        missing = deduped.height() - cleaned.height(),
        rows_out = cleaned.height(),
        "cleaned rows"
    );
    cleaned
}
