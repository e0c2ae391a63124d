use std::hash::Hash;

use super::group::group_by;
use super::{Aggregate, NanPolicy};

/// Arithmetic mean of `value_fn` per key, first-seen key order.
///
/// With [`NanPolicy::Skip`] a key whose values are all `NaN` still appears,
/// with a `NaN` mean.
pub fn mean_by<'a, T, K, F, G>(
    records: impl IntoIterator<Item = &'a T>,
    key_fn: F,
    value_fn: G,
    policy: NanPolicy,
) -> Vec<Aggregate<K, f64>>
where
    T: 'a + ?Sized,
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
    G: Fn(&T) -> f64,
{
    group_by(records, key_fn)
        .into_iter()
        .map(|(key, members)| {
            let values = members.into_iter().map(&value_fn);
            let (sum, count) = match policy {
                NanPolicy::Propagate => values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1)),
                NanPolicy::Skip => values
                    .filter(|v| !v.is_nan())
                    .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1)),
            };
            let value = if count == 0 { f64::NAN } else { sum / count as f64 };
            Aggregate { key, value }
        })
        .collect()
}
