/// An item paired with its 1-based position in a ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub rank: usize,
    pub item: T,
}

/// Order `items` by descending value. Equal values keep their input order.
pub fn rank_by_value<T, F>(mut items: Vec<T>, value_of: F) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> f64,
{
    // `sort_by` is stable, so ties fall back to input order.
    items.sort_by(|a, b| value_of(b).total_cmp(&value_of(a)));
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| Ranked {
            rank: index + 1,
            item,
        })
        .collect()
}
