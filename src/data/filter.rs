use std::collections::HashMap;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// Row predicates applied before aggregation
// ---------------------------------------------------------------------------

/// Keep the records whose key equals `wanted`, preserving order.
pub fn matching<'a, T, K, F>(records: &'a [T], key_fn: F, wanted: &K) -> Vec<&'a T>
where
    K: PartialEq + ?Sized,
    F: Fn(&T) -> &K,
{
    records.iter().filter(|r| key_fn(*r) == wanted).collect()
}

/// Keep the records whose key occurs strictly more than `min_count` times
/// among `records`, preserving order.
///
/// A key seen exactly `min_count` times is dropped.
pub fn frequent<'a, T, K, F>(records: &[&'a T], key_fn: F, min_count: usize) -> Vec<&'a T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut occurrences: HashMap<K, usize> = HashMap::new();
    for r in records {
        *occurrences.entry(key_fn(*r)).or_default() += 1;
    }

    records
        .iter()
        .copied()
        .filter(|r| occurrences.get(&key_fn(*r)).copied().unwrap_or(0) > min_count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_keeps_order() {
        let rows = vec![("US", 1), ("DE", 2), ("US", 3)];
        let kept = matching(&rows, |r| r.0, "US");
        assert_eq!(kept, vec![&("US", 1), &("US", 3)]);
    }

    #[test]
    fn frequent_is_strictly_greater() {
        let rows = vec!["a", "b", "a", "b", "b", "c"];
        let refs: Vec<&&str> = rows.iter().collect();

        let kept = frequent(&refs, |r| *r, 2);
        assert_eq!(kept, vec![&"b", &"b", &"b"]);

        let kept = frequent(&refs, |r| *r, 0);
        assert_eq!(kept.len(), rows.len());
    }
}
