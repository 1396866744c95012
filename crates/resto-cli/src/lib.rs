//! Library components of the `resto` batch runner.

pub mod logging;
pub mod pipeline;
