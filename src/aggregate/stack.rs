use std::hash::Hash;

use serde::Serialize;

use super::group::{group_by, PairCount};

/// Sub-category fractions of one outer category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackRow<O, L> {
    pub outer: O,
    /// Sum of the declared labels' counts.
    pub total: usize,
    /// One entry per declared label, in declaration order.
    pub fractions: Vec<(L, f64)>,
}

/// One segment of a 0..1 stacked bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackBand<L> {
    pub label: L,
    pub lower: f64,
    pub upper: f64,
}

impl<O, L: PartialEq + Clone> StackRow<O, L> {
    pub fn fraction(&self, label: &L) -> Option<f64> {
        self.fractions
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, f)| *f)
    }

    /// Cumulative bands, bottom to top in label order.
    pub fn offsets(&self) -> Vec<StackBand<L>> {
        let mut lower = 0.0;
        self.fractions
            .iter()
            .map(|(label, f)| {
                let band = StackBand {
                    label: label.clone(),
                    lower,
                    upper: lower + f,
                };
                lower += f;
                band
            })
            .collect()
    }
}

/// Turn pair counts into per-outer fractions over `labels`.
///
/// Labels missing from an outer category count as zero; inner keys that are
/// not declared labels are left out of the total. An outer category whose
/// total is zero gets a fraction of `0.0` for every label.
pub fn normalize_stack<O, L>(counts: &[PairCount<O, L>], labels: &[L]) -> Vec<StackRow<O, L>>
where
    O: Eq + Hash + Clone,
    L: PartialEq + Clone,
{
    group_by(counts, |c| c.outer.clone())
        .into_iter()
        .map(|(outer, cells)| {
            let per_label: Vec<usize> = labels
                .iter()
                .map(|label| {
                    cells
                        .iter()
                        .filter(|c| &c.inner == label)
                        .map(|c| c.count)
                        .sum()
                })
                .collect();
            let total: usize = per_label.iter().sum();

            if total == 0 {
                log::debug!("stack row with zero total over {} labels", labels.len());
            }

            let fractions = labels
                .iter()
                .cloned()
                .zip(per_label)
                .map(|(label, count)| {
                    let f = if total == 0 {
                        0.0
                    } else {
                        count as f64 / total as f64
                    };
                    (label, f)
                })
                .collect();

            StackRow {
                outer,
                total,
                fractions,
            }
        })
        .collect()
}

/// Reorder rows along a declared outer axis. Undeclared outer keys are
/// dropped; declared keys with no row are skipped.
pub fn order_rows<O, L>(rows: Vec<StackRow<O, L>>, outer_order: &[O]) -> Vec<StackRow<O, L>>
where
    O: PartialEq,
{
    let mut rows: Vec<Option<StackRow<O, L>>> = rows.into_iter().map(Some).collect();
    outer_order
        .iter()
        .filter_map(|key| {
            rows.iter_mut()
                .find(|r| r.as_ref().is_some_and(|r| &r.outer == key))
                .and_then(Option::take)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(outer: &'static str, inner: &'static str, count: usize) -> PairCount<&'static str, &'static str> {
        PairCount { outer, inner, count }
    }

    const LEVELS: [&str; 4] = ["EN", "MI", "SE", "EX"];

    #[test]
    fn fractions_sum_to_one() {
        let counts = vec![
            cell("M", "SE", 7),
            cell("M", "EN", 2),
            cell("L", "MI", 3),
            cell("M", "EX", 1),
            cell("L", "SE", 3),
        ];
        let rows = normalize_stack(&counts, &LEVELS);

        assert_eq!(rows.len(), 2);
        for row in &rows {
            let sum: f64 = row.fractions.iter().map(|(_, f)| f).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{row:?}");
        }
        assert_eq!(rows[0].outer, "M");
        assert_eq!(rows[0].total, 10);
        assert_eq!(rows[0].fraction(&"SE"), Some(0.7));
        assert_eq!(rows[0].fraction(&"MI"), Some(0.0));
    }

    #[test]
    fn undeclared_labels_are_ignored() {
        let counts = vec![cell("S", "EN", 1), cell("S", "XX", 9)];
        let rows = normalize_stack(&counts, &LEVELS);

        assert_eq!(rows[0].total, 1);
        assert_eq!(rows[0].fraction(&"EN"), Some(1.0));
    }

    #[test]
    fn zero_total_gives_zero_fractions() {
        let counts = vec![cell("S", "XX", 4)];
        let rows = normalize_stack(&counts, &LEVELS);

        assert_eq!(rows[0].total, 0);
        assert!(rows[0].fractions.iter().all(|(_, f)| *f == 0.0));
    }

    #[test]
    fn offsets_stack_from_zero() {
        let counts = vec![cell("S", "EN", 1), cell("S", "SE", 3)];
        let rows = normalize_stack(&counts, &LEVELS);
        let bands = rows[0].offsets();

        assert_eq!(bands[0], StackBand { label: "EN", lower: 0.0, upper: 0.25 });
        assert_eq!(bands[1], StackBand { label: "MI", lower: 0.25, upper: 0.25 });
        assert_eq!(bands[3].upper, 1.0);
    }

    #[test]
    fn rows_follow_declared_order() {
        let counts = vec![cell("L", "EN", 1), cell("Q", "EN", 1), cell("S", "EN", 1)];
        let rows = order_rows(normalize_stack(&counts, &LEVELS), &["S", "M", "L"]);
        let outers: Vec<&str> = rows.iter().map(|r| r.outer).collect();
        assert_eq!(outers, vec!["S", "L"]);
    }
}
