use serde::Serialize;

use super::NanPolicy;

/// Whisker reach, in interquartile ranges beyond Q1 / Q3.
pub const WHISKER_IQR: f64 = 1.5;

/// Quantile `p` (0..=1) of an ascending sample, interpolating linearly
/// between the order statistics around `(n - 1) * p`.
///
/// Returns `None` for an empty sample.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let idx = (n - 1) as f64 * p;
    let lo = idx.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = idx - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Quantile `p` of an unsorted sample. Sorts a private copy.
pub fn quantile(sample: &[f64], p: f64) -> Option<f64> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, p)
}

/// Five-number box-plot summary of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStat {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub whisker_min: f64,
    pub whisker_max: f64,
}

impl BoxStat {
    /// Summarise `sample`.
    ///
    /// `floor` clamps the lower whisker from below (salaries use `Some(0.0)`);
    /// `None` leaves it at `q1 - 1.5 * iqr`. The caller's slice is never
    /// reordered. Returns `None` when no value is left to summarise.
    pub fn compute(sample: &[f64], floor: Option<f64>, policy: NanPolicy) -> Option<BoxStat> {
        let mut sorted: Vec<f64> = match policy {
            NanPolicy::Skip => sample.iter().copied().filter(|v| !v.is_nan()).collect(),
            NanPolicy::Propagate => sample.to_vec(),
        };
        if sorted.is_empty() {
            return None;
        }
        if sorted.iter().any(|v| v.is_nan()) {
            return Some(BoxStat::nan());
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25)?;
        let median = quantile_sorted(&sorted, 0.5)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;

        let lower = q1 - WHISKER_IQR * iqr;
        let whisker_min = match floor {
            Some(f) => lower.max(f),
            None => lower,
        };

        Some(BoxStat {
            q1,
            median,
            q3,
            iqr,
            whisker_min,
            whisker_max: q3 + WHISKER_IQR * iqr,
        })
    }

    fn nan() -> BoxStat {
        BoxStat {
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            iqr: f64::NAN,
            whisker_min: f64::NAN,
            whisker_max: f64::NAN,
        }
    }
}
