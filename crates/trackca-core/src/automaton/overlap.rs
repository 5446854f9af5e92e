use std::collections::BTreeSet;

use crate::model::{HasAutomatonCell, ItemArena, ItemId, Path};

/// Quality of a candidate: the cell state of its head
pub fn path_quality<T: HasAutomatonCell>(arena: &ItemArena<T>, path: &[ItemId]) -> f64 {
    path.first()
        .and_then(|&head| arena.cell(head))
        .map_or(f64::NEG_INFINITY, |cell| cell.cell_state())
}

/// Drop candidates whose item set is contained in another candidate's
///
/// Candidates are compared pairwise in order. When one set contains the
/// other, the candidate with the lower quality is dropped; on equal quality
/// the later one goes. A dropped candidate still takes part in the remaining
/// comparisons of its row, so every subset it covered is removed too.
/// Survivors keep their order.
///
/// # Returns
/// Number of candidates removed
pub fn remove_subset_paths<T: HasAutomatonCell>(
    arena: &ItemArena<T>,
    paths: &mut Vec<Path>,
) -> usize {
    let sets: Vec<BTreeSet<ItemId>> = paths
        .iter()
        .map(|path| path.iter().copied().collect())
        .collect();
    let quality: Vec<f64> = paths.iter().map(|path| path_quality(arena, path)).collect();
    let mut alive = vec![true; paths.len()];

    for i in 0..sets.len() {
        if !alive[i] {
            continue;
        }
        for j in i + 1..sets.len() {
            if !alive[j] {
                continue;
            }
            if !sets[i].is_subset(&sets[j]) && !sets[j].is_subset(&sets[i]) {
                continue;
            }
            if quality[i] >= quality[j] {
                alive[j] = false;
            } else {
                alive[i] = false;
            }
        }
    }

    let before = paths.len();
    let mut keep = alive.into_iter();
    paths.retain(|_| keep.next().unwrap_or(true));
    let n_removed = before - paths.len();

    tracing::debug!(n_removed, n_left = paths.len(), "subset candidates removed");
    n_removed
}
