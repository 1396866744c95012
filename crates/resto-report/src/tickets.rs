//! Support load per order.

use polars::prelude::{DataFrame, DataType, IntoLazy, SortMultipleOptions, col, len};
use tracing::debug;

use crate::error::{ReportError, Result};

/// Join key shared by orders and tickets.
pub const ORDER_ID: &str = "order_id";
/// Output count column of [`tickets_per_order`].
pub const NUMBER_OF_TICKETS: &str = "number_of_tickets";

fn order_ids(df: &DataFrame) -> Result<DataFrame> {
    if df.get_column_index(ORDER_ID).is_none() {
        return Err(ReportError::MissingColumn(ORDER_ID.to_string()));
    }
    Ok(df.select([ORDER_ID])?)
}

/// Count tickets for each order that has at least one.
///
/// Orders and tickets are inner-joined on `order_id`, so orders without
/// tickets and tickets without a known order are both absent. Groups come
/// back sorted by `order_id`.
pub fn tickets_per_order(orders: &DataFrame, tickets: &DataFrame) -> Result<DataFrame> {
    let orders = order_ids(orders)?;
    let tickets = order_ids(tickets)?;
    let counts = orders
        .lazy()
        .inner_join(tickets.lazy(), col(ORDER_ID), col(ORDER_ID))
        .group_by([col(ORDER_ID)])
        .agg([len().cast(DataType::Int64).alias(NUMBER_OF_TICKETS)])
        .sort([ORDER_ID], SortMultipleOptions::default())
        .collect()?;
    debug!(orders = counts.height(), "tickets per order");
    Ok(counts)
}
