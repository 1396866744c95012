//! Single-value metrics over cleaned orders.

use polars::df;
use polars::prelude::{DataFrame, DataType};
use tracing::debug;

use crate::error::{ReportError, Result};

/// Order amount column the revenue metrics read.
pub const SUBTOTAL: &str = "subtotal";
/// Output column of [`average_order_value`].
pub const AVERAGE_ORDER_VALUE: &str = "average_order_value";
/// Output column of [`total_revenue`].
pub const TOTAL_REVENUE: &str = "total_revenue";

/// Non-missing subtotals as `f64`; nulls and NaN are skipped.
fn subtotals(orders: &DataFrame) -> Result<Vec<f64>> {
    let column = orders
        .column(SUBTOTAL)
        .map_err(|_| ReportError::MissingColumn(SUBTOTAL.to_string()))?;
    match column.dtype() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64
        | DataType::Null => {}
        other => {
            return Err(ReportError::NonNumeric {
                column: SUBTOTAL.to_string(),
                dtype: other.to_string(),
            });
        }
    }
    let values = column.cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Mean subtotal as a one-row table.
///
/// An empty input yields NaN rather than an error.
pub fn average_order_value(orders: &DataFrame) -> Result<DataFrame> {
    let values = subtotals(orders)?;
    let mean = if values.is_empty() {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    };
    debug!(orders = values.len(), mean, "average order value");
    Ok(df! { AVERAGE_ORDER_VALUE => [mean] }?)
}

/// Summed subtotal as a one-row table; an empty input sums to zero.
pub fn total_revenue(orders: &DataFrame) -> Result<DataFrame> {
    let values = subtotals(orders)?;
    let total: f64 = values.iter().sum();
    debug!(orders = values.len(), total, "total revenue");
    Ok(df! { TOTAL_REVENUE => [total] }?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_subtotals_are_accepted() {
        let orders = df! { "subtotal" => [10i64, 20] }.unwrap();
        let avg = average_order_value(&orders).unwrap();
        assert_eq!(avg.column(AVERAGE_ORDER_VALUE).unwrap().dtype(), &DataType::Float64);
        assert_eq!(
            avg.column(AVERAGE_ORDER_VALUE).unwrap().f64().unwrap().get(0),
            Some(15.0)
        );
    }

    #[test]
    fn string_subtotals_are_rejected() {
        let orders = df! { "subtotal" => ["10.0"] }.unwrap();
        assert!(matches!(
            total_revenue(&orders),
            Err(ReportError::NonNumeric { .. })
        ));
    }

    #[test]
    fn nulls_are_skipped() {
        let orders = df! { "subtotal" => [Some(10.0), None, Some(30.0)] }.unwrap();
        let avg = average_order_value(&orders).unwrap();
        assert_eq!(
            avg.column(AVERAGE_ORDER_VALUE).unwrap().f64().unwrap().get(0),
            Some(20.0)
        );
    }
}
