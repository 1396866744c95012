//! Silver-layer normalization for the restaurant ETL.
//!
//! - **normalization**: `clean_customers`, `clean_orders`, `clean_tickets`
//! - **serialize**: canonical encoding of nested cell values
//! - **datetime**: unambiguous timestamp parsing
//! - **frame_builder**: typed frames from semi-structured tables
//!
//! All cleaners borrow their input and return a new frame.

pub mod datetime;
pub mod error;
pub mod frame_builder;
pub mod normalization;
pub mod serialize;

pub use datetime::parse_timestamp;
pub use error::{Result, TransformError};
pub use normalization::{
    ORDER_ID, ORDERED_AT, RAW_ID, TAGS, clean_customers, clean_orders, clean_tickets,
};
pub use serialize::{canonical_json, encode};
