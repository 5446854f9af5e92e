use std::ops::ControlFlow;

use super::relaxation::chain_value;
use crate::model::{AutomatonCell, HasAutomatonCell, ItemArena, ItemId, Path};
use crate::neighborhood::WeightedNeighborhood;

/// Check whether `neighbor` is a best continuation of `cell`
///
/// Re-derives the relaxation decision: the neighbor must be usable and the
/// chain through it must reproduce the item's cell state exactly.
pub fn is_highest_neighbor(
    cell: &AutomatonCell,
    relation_weight: f64,
    neighbor: &AutomatonCell,
) -> bool {
    neighbor.is_usable()
        && cell.cell_state()
            == chain_value(cell.cell_weight(), relation_weight, neighbor.cell_state())
}

/// Highest neighbors of `item` in neighbor order
pub fn highest_neighbors<'a, T: HasAutomatonCell>(
    arena: &'a ItemArena<T>,
    neighborhood: &'a WeightedNeighborhood,
    item: ItemId,
) -> impl Iterator<Item = ItemId> + 'a {
    let cell = arena.cell(item);
    neighborhood
        .outgoing_of(item)
        .filter_map(move |(relation_weight, neighbor)| {
            let cell = cell?;
            let neighbor_cell = arena.cell(neighbor)?;
            is_highest_neighbor(cell, relation_weight, neighbor_cell).then_some(neighbor)
        })
}

fn is_valid_start(cell: &AutomatonCell, min_state_to_follow: f64) -> bool {
    cell.is_start() && cell.is_usable() && cell.cell_state() >= min_state_to_follow
}

/// Follow every maximal chain from every start item
///
/// Start items are visited in arena order. From each start, every highest
/// neighbor of the current tail is explored depth-first, so equally good
/// neighbors give several paths sharing a prefix. A path is emitted when its
/// tail has no highest neighbor.
///
/// Start items that are flagged DO_NOT_USE or IS_CYCLE, or whose state is
/// below `min_state_to_follow`, are skipped.
///
/// # Arguments
/// * `arena` - Relaxed and seeded items
/// * `neighborhood` - Relations between the items
/// * `out_paths` - Receives the paths; existing entries are kept
/// * `min_state_to_follow` - Minimal cell state of a start item
///
/// # Returns
/// Number of paths appended to `out_paths`
pub fn follow_all<T: HasAutomatonCell>(
    arena: &ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
    out_paths: &mut Vec<Path>,
    min_state_to_follow: f64,
) -> usize {
    let before = out_paths.len();
    // The visitor never breaks, so the walk covers every seed
    let _: ControlFlow<()> = walk_all(arena, neighborhood, min_state_to_follow, |path| {
        out_paths.push(path.to_vec());
        ControlFlow::Continue(())
    });
    out_paths.len() - before
}

/// Follow the first best chain from `start` without branching
///
/// On success `out_path` is replaced by the chain, head = `start`.
///
/// # Returns
/// `false`, leaving `out_path` untouched, if `start` is unknown, not flagged
/// IS_START, excluded, or below `min_state_to_follow`
pub fn follow_single<T: HasAutomatonCell>(
    arena: &ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
    start: ItemId,
    out_path: &mut Path,
    min_state_to_follow: f64,
) -> bool {
    match arena.cell(start) {
        Some(cell) if is_valid_start(cell, min_state_to_follow) => {}
        _ => return false,
    }

    out_path.clear();
    out_path.push(start);
    let mut tail = start;
    loop {
        let next = highest_neighbors(arena, neighborhood, tail)
            .find(|candidate| !out_path.contains(candidate));
        match next {
            Some(next) => {
                out_path.push(next);
                tail = next;
            }
            None => return true,
        }
    }
}

/// Depth-first enumeration shared by `follow_all` and the bounded counters
///
/// `visit` sees every complete path and may stop the enumeration.
pub(crate) fn walk_all<T, F>(
    arena: &ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
    min_state_to_follow: f64,
    mut visit: F,
) -> ControlFlow<()>
where
    T: HasAutomatonCell,
    F: FnMut(&[ItemId]) -> ControlFlow<()>,
{
    let mut path: Path = Vec::new();
    // (depth, item): item goes to path[depth]
    let mut stack: Vec<(usize, ItemId)> = Vec::new();
    let mut successors: Vec<ItemId> = Vec::new();

    for (start, item) in arena.iter() {
        if !is_valid_start(item.automaton_cell(), min_state_to_follow) {
            continue;
        }

        stack.push((0, start));
        while let Some((depth, item)) = stack.pop() {
            path.truncate(depth);
            path.push(item);

            successors.clear();
            successors.extend(
                highest_neighbors(arena, neighborhood, item).filter(|next| !path.contains(next)),
            );

            if successors.is_empty() {
                visit(path.as_slice())?;
                continue;
            }
            // Reversed so the first neighbor is explored first.
            stack.extend(successors.iter().rev().map(|&next| (depth + 1, next)));
        }
    }
    ControlFlow::Continue(())
}
