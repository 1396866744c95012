//! Gold-layer analytics for the restaurant ETL.
//!
//! Each metric borrows cleaned silver tables and returns a new table.

pub mod error;
pub mod revenue;
pub mod tickets;

pub use error::{ReportError, Result};
pub use revenue::{AVERAGE_ORDER_VALUE, SUBTOTAL, TOTAL_REVENUE, average_order_value, total_revenue};
pub use tickets::{NUMBER_OF_TICKETS, ORDER_ID, tickets_per_order};
