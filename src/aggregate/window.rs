/// Records sorted ascending by date. The sort is stable, so records sharing a
/// date keep their input order.
pub fn sort_by_date<'a, T, D, F>(records: impl IntoIterator<Item = &'a T>, date_fn: F) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    D: Ord,
    F: Fn(&T) -> D,
{
    let mut sorted: Vec<&'a T> = records.into_iter().collect();
    sorted.sort_by_key(|r| date_fn(*r));
    sorted
}

/// The `n` latest records, oldest first. Fewer than `n` records are all
/// returned, sorted.
pub fn recent_window<'a, T, D, F>(records: impl IntoIterator<Item = &'a T>, date_fn: F, n: usize) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    D: Ord,
    F: Fn(&T) -> D,
{
    let mut sorted = sort_by_date(records, date_fn);
    let skip = sorted.len().saturating_sub(n);
    sorted.drain(..skip);
    sorted
}
