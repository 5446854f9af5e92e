use tracing::debug;

use crate::model::{CellFlags, HasAutomatonCell, ItemArena, ItemId};
use crate::neighborhood::WeightedNeighborhood;

/// Diagnostic counts of one relaxation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaxationReport {
    /// Sweeps that resolved at least one item; equals the longest chain length
    pub n_rounds: usize,
    /// Items whose cell state was assigned
    pub n_assigned: usize,
    /// Items flagged IS_CYCLE
    pub n_cycle: usize,
}

/// Value of the chain `item -> neighbor -> ...`
///
/// Both the relaxation and `is_highest_neighbor` go through this function,
/// so the re-derivation of the chosen neighbor compares bit-identical values.
#[inline]
pub fn chain_value(cell_weight: f64, relation_weight: f64, neighbor_state: f64) -> f64 {
    cell_weight + (relation_weight + neighbor_state)
}

/// Compute the final cell state of every usable item
///
/// Runs repeated sweeps over the arena. In a sweep, every unresolved usable
/// item whose usable neighbors were all resolved before the sweep gets
///
/// `state = weight + max(0, max over neighbors (relation weight + neighbor state))`
///
/// and is flagged IS_ASSIGNED. Items without usable neighbors resolve in the
/// first sweep, so sweep `k` resolves the items whose longest outward chain
/// has `k` items.
///
/// When a sweep resolves nothing while unresolved items remain, the remaining
/// items contain a cycle. The members of every cyclic strongly connected
/// component are flagged IS_CYCLE, which removes them from the graph, and the
/// sweeps continue. Items that only lead into a cycle are resolved afterwards
/// against their other neighbors.
///
/// Every cell starts from `state = weight` and loses the IS_ASSIGNED and
/// IS_CYCLE flags of a previous relaxation, so excluded items end with their
/// weight as state. IS_START and DO_NOT_USE are left alone; DO_NOT_USE is
/// honored.
///
/// # Arguments
/// * `arena` - Items of the event; cell weights must be set
/// * `neighborhood` - Relations between the items
///
/// # Returns
/// Round, assignment and cycle counts for caller-side diagnostics
pub fn relax<T: HasAutomatonCell>(
    arena: &mut ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
) -> RelaxationReport {
    for (_, item) in arena.iter_mut() {
        item.automaton_cell_mut().begin_relaxation();
    }

    let mut report = RelaxationReport::default();
    let mut ready: Vec<(ItemId, f64)> = Vec::new();

    loop {
        ready.clear();
        let mut n_pending = 0;

        for (id, item) in arena.iter() {
            let cell = item.automaton_cell();
            if !cell.is_usable() || cell.is_assigned() {
                continue;
            }
            match resolved_state(arena, neighborhood, id) {
                Some(state) => ready.push((id, state)),
                None => n_pending += 1,
            }
        }

        if !ready.is_empty() {
            report.n_rounds += 1;
            report.n_assigned += ready.len();
            for &(id, state) in &ready {
                let cell = arena[id].automaton_cell_mut();
                cell.set_cell_state(state);
                cell.set_flags(CellFlags::IS_ASSIGNED);
            }
            debug!(
                round = report.n_rounds,
                n_resolved = ready.len(),
                n_pending,
                "relaxation round"
            );
            continue;
        }

        if n_pending == 0 {
            break;
        }

        let n_flagged = flag_cycles(arena, neighborhood);
        debug!(n_flagged, n_pending, "cyclic relations flagged");
        if n_flagged == 0 {
            // Every pending item has an unresolved usable neighbor, so a
            // cycle must exist. Stop rather than spin if it was not found.
            break;
        }
        report.n_cycle += n_flagged;
    }

    report
}

/// Final state of `id` if all its usable neighbors are resolved
///
/// The first neighbor with the strictly highest contribution wins, so ties
/// are broken by neighbor order.
fn resolved_state<T: HasAutomatonCell>(
    arena: &ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
    id: ItemId,
) -> Option<f64> {
    let cell = arena[id].automaton_cell();
    let mut best: Option<(f64, f64, f64)> = None;

    for (relation_weight, neighbor) in neighborhood.outgoing_of(id) {
        let Some(neighbor_cell) = arena.cell(neighbor) else {
            continue;
        };
        if !neighbor_cell.is_usable() {
            continue;
        }
        if !neighbor_cell.is_assigned() {
            return None;
        }
        let contribution = relation_weight + neighbor_cell.cell_state();
        if best.map_or(true, |(current, _, _)| contribution > current) {
            best = Some((contribution, relation_weight, neighbor_cell.cell_state()));
        }
    }

    let state = match best {
        Some((contribution, relation_weight, neighbor_state)) if contribution > 0.0 => {
            chain_value(cell.cell_weight(), relation_weight, neighbor_state)
        }
        _ => cell.cell_weight(),
    };
    Some(state)
}

/// Flag the members of cyclic components among the unresolved usable items
///
/// Iterative Tarjan over the subgraph of unresolved usable items, rooted in
/// arena order. A component is cyclic if it has more than one member or a
/// self relation.
///
/// # Returns
/// Number of items flagged IS_CYCLE
fn flag_cycles<T: HasAutomatonCell>(
    arena: &mut ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
) -> usize {
    const UNVISITED: usize = usize::MAX;

    let n = arena.len();
    let active: Vec<bool> = arena
        .iter()
        .map(|(_, item)| {
            let cell = item.automaton_cell();
            cell.is_usable() && !cell.is_assigned()
        })
        .collect();

    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut in_cycle = vec![false; n];
    let mut next_index = 0usize;

    for root in 0..n {
        if !active[root] || index[root] != UNVISITED {
            continue;
        }

        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        // (node, position of the next relation to explore)
        let mut call: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = call.last_mut() {
            let v = frame.0;
            let relations = neighborhood.neighbors(ItemId::new(v as u32));

            if frame.1 < relations.len() {
                let w = relations[frame.1].to.index();
                frame.1 += 1;
                if w >= n || !active[w] {
                    continue;
                }
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    call.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            call.pop();
            if let Some(&(parent, _)) = call.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }
            if lowlink[v] != index[v] {
                continue;
            }

            let mut component = Vec::new();
            while let Some(w) = stack.pop() {
                on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            let self_loop = relations.iter().any(|rel| rel.to.index() == v);
            if component.len() > 1 || self_loop {
                for w in component {
                    in_cycle[w] = true;
                }
            }
        }
    }

    let mut n_flagged = 0;
    for (id, item) in arena.iter_mut() {
        if in_cycle[id.index()] {
            item.automaton_cell_mut().set_flags(CellFlags::IS_CYCLE);
            n_flagged += 1;
        }
    }
    n_flagged
}
