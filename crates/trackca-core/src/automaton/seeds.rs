use super::path_follower::is_highest_neighbor;
use crate::model::{CellFlags, HasAutomatonCell, ItemArena};
use crate::neighborhood::WeightedNeighborhood;

/// Flag the legal path starts of a relaxed graph with IS_START
///
/// A candidate is a usable item (neither DO_NOT_USE nor IS_CYCLE) with
/// `cell_state >= min_seed_state`.
///
/// - `strict`: a candidate is a seed only if no usable item picked it as one
///   of its highest neighbors, i.e. it is the head of its chain and not the
///   tail end of a better one.
/// - non-strict: every candidate is a seed. This yields more overlapping
///   candidates downstream and always includes the strict seeds.
///
/// Existing IS_START flags are left in place.
///
/// # Returns
/// Number of items flagged by this call; zero means no track candidates
pub fn mark_seeds<T: HasAutomatonCell>(
    arena: &mut ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
    strict: bool,
    min_seed_state: f64,
) -> usize {
    let mut continues_a_chain = vec![false; arena.len()];
    if strict {
        for (id, item) in arena.iter() {
            let cell = item.automaton_cell();
            if !cell.is_usable() {
                continue;
            }
            for (relation_weight, neighbor) in neighborhood.outgoing_of(id) {
                let Some(neighbor_cell) = arena.cell(neighbor) else {
                    continue;
                };
                if is_highest_neighbor(cell, relation_weight, neighbor_cell) {
                    continues_a_chain[neighbor.index()] = true;
                }
            }
        }
    }

    let mut n_seeds = 0;
    for (id, item) in arena.iter_mut() {
        let cell = item.automaton_cell_mut();
        if !cell.is_usable() || cell.cell_state() < min_seed_state {
            continue;
        }
        if strict && continues_a_chain[id.index()] {
            continue;
        }
        cell.set_flags(CellFlags::IS_START);
        n_seeds += 1;
    }

    tracing::debug!(n_seeds, strict, "seeds marked");
    n_seeds
}
