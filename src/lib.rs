//! Aggregation layer behind the rusty-dash dashboards.
//!
//! Raw CSV rows are coerced once into typed records, projected into per-dataset
//! rows, and reduced by the pure functions in [`aggregate`] into the series the
//! charts in [`charts`] hand to the viewer.

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod data;
pub mod datasets;
pub mod format;
