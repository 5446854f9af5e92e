use std::fmt;

use crate::automaton::{chain_value, is_highest_neighbor};
use crate::model::{HasAutomatonCell, ItemArena, ItemId};
use crate::neighborhood::WeightedNeighborhood;

/// One broken cell state found after relaxation
#[derive(Debug, Clone, PartialEq)]
pub enum StateViolation {
    /// Usable item left without an assigned state
    Unassigned { item: ItemId },
    /// State smaller than the item's own weight
    BelowWeight { item: ItemId, state: f64, weight: f64 },
    /// A relation offers a better chain than the assigned state
    EdgeNotDominated {
        item: ItemId,
        neighbor: ItemId,
        state: f64,
        chain: f64,
    },
    /// State differs from the weight but no neighbor reproduces it
    NoTightNeighbor { item: ItemId, state: f64 },
}

impl StateViolation {
    pub fn item(&self) -> ItemId {
        match self {
            StateViolation::Unassigned { item }
            | StateViolation::BelowWeight { item, .. }
            | StateViolation::EdgeNotDominated { item, .. }
            | StateViolation::NoTightNeighbor { item, .. } => *item,
        }
    }
}

impl fmt::Display for StateViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateViolation::Unassigned { item } => write!(f, "item {} has no state", item),
            StateViolation::BelowWeight {
                item,
                state,
                weight,
            } => write!(f, "item {} state {} below weight {}", item, state, weight),
            StateViolation::EdgeNotDominated {
                item,
                neighbor,
                state,
                chain,
            } => write!(
                f,
                "item {} state {} below chain {} through {}",
                item, state, chain, neighbor
            ),
            StateViolation::NoTightNeighbor { item, state } => {
                write!(f, "item {} state {} not reproduced by any neighbor", item, state)
            }
        }
    }
}

/// Find every item whose state breaks the relaxation equations
///
/// Items flagged DO_NOT_USE or IS_CYCLE are only checked against their own
/// weight, and relations into them are ignored.
///
/// Returns the violations in arena order.
pub fn find_state_violations<T: HasAutomatonCell>(
    arena: &ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
) -> Vec<StateViolation> {
    let mut violations = Vec::new();

    for (item, payload) in arena.iter() {
        let cell = payload.automaton_cell();
        let state = cell.cell_state();
        let weight = cell.cell_weight();
        if !cell.is_usable() {
            if state < weight {
                violations.push(StateViolation::BelowWeight {
                    item,
                    state,
                    weight,
                });
            }
            continue;
        }
        if !cell.is_assigned() {
            violations.push(StateViolation::Unassigned { item });
            continue;
        }

        if state < weight {
            violations.push(StateViolation::BelowWeight {
                item,
                state,
                weight,
            });
        }

        let mut tight = false;
        for (relation_weight, neighbor) in neighborhood.outgoing_of(item) {
            let Some(neighbor_cell) = arena.cell(neighbor) else {
                continue;
            };
            if !neighbor_cell.is_usable() {
                continue;
            }
            let chain = chain_value(weight, relation_weight, neighbor_cell.cell_state());
            if state < chain {
                violations.push(StateViolation::EdgeNotDominated {
                    item,
                    neighbor,
                    state,
                    chain,
                });
            }
            tight |= is_highest_neighbor(cell, relation_weight, neighbor_cell);
        }

        if state != weight && !tight {
            violations.push(StateViolation::NoTightNeighbor { item, state });
        }
    }

    violations
}
