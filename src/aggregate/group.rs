use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use super::Aggregate;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Count of records sharing a key, with the identifiers that made it up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedCount<K, I> {
    pub key: K,
    pub count: usize,
    /// Contributing identifiers, in record order.
    pub items: Vec<I>,
}

/// One cell of a two-level grouping, flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairCount<O, I> {
    pub outer: O,
    pub inner: I,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Partition `records` by key. Groups come out in first-seen key order and
/// each group keeps record order.
pub fn group_by<'a, T, K, F>(records: impl IntoIterator<Item = &'a T>, key_fn: F) -> Vec<(K, Vec<&'a T>)>
where
    T: 'a + ?Sized,
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();

    for record in records {
        let key = key_fn(record);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }
    groups
}

/// Count records per key, collecting one identifier per record.
///
/// Keys with no records never appear; see [`dense_counts`] for axis lookups.
pub fn count_by<'a, T, K, I, F, G>(
    records: impl IntoIterator<Item = &'a T>,
    key_fn: F,
    item_fn: G,
) -> Vec<GroupedCount<K, I>>
where
    T: 'a + ?Sized,
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
    G: Fn(&T) -> I,
{
    let counts: Vec<GroupedCount<K, I>> = group_by(records, key_fn)
        .into_iter()
        .map(|(key, members)| GroupedCount {
            key,
            count: members.len(),
            items: members.into_iter().map(&item_fn).collect(),
        })
        .collect();

    log::debug!("count_by: {} groups", counts.len());
    counts
}

/// Two-level count: outer keys in first-seen order, inner keys first-seen
/// within their outer key.
pub fn count_by_pair<'a, T, O, I, F, G>(
    records: impl IntoIterator<Item = &'a T>,
    outer_fn: F,
    inner_fn: G,
) -> Vec<PairCount<O, I>>
where
    T: 'a + ?Sized,
    O: Eq + Hash + Clone,
    I: Eq + Hash + Clone,
    F: Fn(&T) -> O,
    G: Fn(&T) -> I,
{
    let mut pairs = Vec::new();
    for (outer, members) in group_by(records, outer_fn) {
        for (inner, cell) in group_by(members, &inner_fn) {
            pairs.push(PairCount {
                outer: outer.clone(),
                inner,
                count: cell.len(),
            });
        }
    }
    pairs
}

/// Sum pair counts per outer key, first-seen order.
pub fn totals_by_outer<O, I>(pairs: &[PairCount<O, I>]) -> Vec<Aggregate<O, usize>>
where
    O: Eq + Hash + Clone,
{
    group_by(pairs, |p| p.outer.clone())
        .into_iter()
        .map(|(key, cells)| Aggregate {
            key,
            value: cells.iter().map(|c| c.count).sum(),
        })
        .collect()
}

/// Look every `axis` key up in sparse `counts`, reading absent keys as zero.
pub fn dense_counts<K, I>(counts: &[GroupedCount<K, I>], axis: &[K]) -> Vec<(K, usize)>
where
    K: PartialEq + Clone,
{
    axis.iter()
        .map(|key| {
            let count = counts
                .iter()
                .find(|c| &c.key == key)
                .map_or(0, |c| c.count);
            (key.clone(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Project {
        end: i32,
        name: &'static str,
        category: &'static str,
    }

    fn projects() -> Vec<Project> {
        vec![
            Project { end: 2020, name: "A", category: "app" },
            Project { end: 2020, name: "B", category: "service" },
            Project { end: 2021, name: "C", category: "app" },
        ]
    }

    #[test]
    fn counts_with_items_in_first_seen_order() {
        let counts = count_by(&projects(), |p| p.end, |p| p.name.to_string());

        assert_eq!(
            counts,
            vec![
                GroupedCount { key: 2020, count: 2, items: vec!["A".to_string(), "B".to_string()] },
                GroupedCount { key: 2021, count: 1, items: vec!["C".to_string()] },
            ]
        );
    }

    #[test]
    fn first_seen_order_is_not_sorted() {
        let years = [2019, 2012, 2019, 2005];
        let counts = count_by(&years, |y| *y, |_| ());
        let keys: Vec<i32> = counts.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec![2019, 2012, 2005]);
    }

    #[test]
    fn counts_sum_to_input_length() {
        let words = ["a", "b", "a", "c", "c", "c", "d"];
        let counts = count_by(&words, |w| *w, |_| ());
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, words.len());
    }

    #[test]
    fn pair_counts_flatten_two_levels() {
        let pairs = count_by_pair(&projects(), |p| p.category, |p| p.end);

        assert_eq!(
            pairs,
            vec![
                PairCount { outer: "app", inner: 2020, count: 1 },
                PairCount { outer: "app", inner: 2021, count: 1 },
                PairCount { outer: "service", inner: 2020, count: 1 },
            ]
        );

        let totals = totals_by_outer(&pairs);
        assert_eq!(totals[0], Aggregate { key: "app", value: 2 });
        assert_eq!(totals[1], Aggregate { key: "service", value: 1 });
    }

    #[test]
    fn empty_input_gives_no_groups() {
        let none: Vec<Project> = Vec::new();
        assert!(count_by(&none, |p| p.end, |p| p.name).is_empty());
    }

    #[test]
    fn dense_lookup_fills_zeroes() {
        let counts = count_by(&projects(), |p| p.end, |_| ());
        let dense = dense_counts(&counts, &[2019, 2020, 2021]);
        assert_eq!(dense, vec![(2019, 0), (2020, 2), (2021, 1)]);
    }
}
