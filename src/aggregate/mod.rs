//! Aggregation layer: pure transforms from records to chart-ready series.
//!
//! Every function takes an immutable snapshot and returns new values; none of
//! them keep state between calls.
//!
//! ```text
//!   records ──► group ──► counts / pair counts ──► stack (fractions)
//!          └──► group ──► quantile (BoxStat) / mean
//!          └──► window (sorted, trailing N)
//! ```

use serde::Serialize;

pub mod group;
pub mod mean;
pub mod quantile;
pub mod stack;
pub mod window;

pub use group::{count_by, count_by_pair, dense_counts, group_by, totals_by_outer, GroupedCount, PairCount};
pub use mean::mean_by;
pub use quantile::{quantile, quantile_sorted, BoxStat};
pub use stack::{normalize_stack, order_rows, StackBand, StackRow};
pub use window::{recent_window, sort_by_date};

/// What an aggregator does with `NaN` inputs (malformed numeric cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NanPolicy {
    /// A `NaN` input makes the statistic of its group `NaN`.
    #[default]
    Propagate,
    /// `NaN` inputs are dropped before computing.
    Skip,
}

/// One `{key, value}` entry of an aggregation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate<K, V> {
    pub key: K,
    pub value: V,
}
