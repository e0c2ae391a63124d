//! Series builders, one per dashboard chart.
//!
//! Each builder takes typed rows plus an explicit config and returns plain
//! derived records. Drawing them is the viewer's job.

pub mod graveyard;
pub mod salaries;
pub mod weather;

/// Hover text of a derived record.
///
/// The viewer calls this for whatever element is under the pointer; the
/// derived records know nothing about how or where it is shown.
pub trait Tooltip {
    fn tooltip(&self) -> String;
}

/// Upper-case the first character: `"sun"` → `"Sun"`.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
