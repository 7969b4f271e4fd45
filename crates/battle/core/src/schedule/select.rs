use crate::env::TieBreaker;

/// Index of the item with the greatest key.
///
/// Keys are read once per item. When several items share the greatest key,
/// one of them is chosen uniformly with a single draw from the tie-break
/// stream. Ties below the greatest key, and selections without a tie,
/// consume nothing.
pub(crate) fn select_by_key<T, K: Ord>(
    items: &[T],
    tie_breaker: &mut TieBreaker,
    key: impl FnMut(&T) -> K,
) -> Option<usize> {
    let keys: Vec<K> = items.iter().map(key).collect();
    let best = keys.iter().max()?;

    let tied = keys.iter().filter(|candidate| *candidate == best).count();
    let pick = if tied > 1 {
        let bound = u32::try_from(tied).unwrap_or(u32::MAX);
        tie_breaker.draw_below(bound) as usize
    } else {
        0
    };

    keys.iter()
        .enumerate()
        .filter(|(_, candidate)| *candidate == best)
        .nth(pick)
        .map(|(index, _)| index)
}
