use trackca_core::model::{AutomatonCell, HasAutomatonCell, ItemArena, ItemId};
use trackca_core::WeightedNeighborhood;

/// Detector hit carrying its automaton cell
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub layer: u32,
    pub position: f64,
    pub cell: AutomatonCell,
}

impl Hit {
    #[allow(dead_code)]
    pub fn new(layer: u32, position: f64) -> Self {
        Self {
            layer,
            position,
            cell: AutomatonCell::default(),
        }
    }
}

impl HasAutomatonCell for Hit {
    fn automaton_cell(&self) -> &AutomatonCell {
        &self.cell
    }

    fn automaton_cell_mut(&mut self) -> &mut AutomatonCell {
        &mut self.cell
    }
}

#[allow(dead_code)]
pub fn id(raw: u32) -> ItemId {
    ItemId::new(raw)
}

/// Arena of bare cells with the given weights
#[allow(dead_code)]
pub fn cells(weights: &[f64]) -> ItemArena<AutomatonCell> {
    weights.iter().map(|&w| AutomatonCell::new(w)).collect()
}

/// Neighborhood from `(from, weight, to)` triples
#[allow(dead_code)]
pub fn neighborhood(n_items: usize, relations: &[(u32, f64, u32)]) -> WeightedNeighborhood {
    let mut hood = WeightedNeighborhood::new(n_items);
    for &(from, weight, to) in relations {
        hood.insert(id(from), weight, id(to)).expect("relation inside arena");
    }
    hood
}

/// A -> B -> C, cell weights 1, relation weights 2
#[allow(dead_code)]
pub fn chain_abc() -> (ItemArena<AutomatonCell>, WeightedNeighborhood) {
    (
        cells(&[1.0, 1.0, 1.0]),
        neighborhood(3, &[(0, 2.0, 1), (1, 2.0, 2)]),
    )
}

/// A <-> B
#[allow(dead_code)]
pub fn cycle_ab() -> (ItemArena<AutomatonCell>, WeightedNeighborhood) {
    (
        cells(&[1.0, 1.0]),
        neighborhood(2, &[(0, 1.0, 1), (1, 1.0, 0)]),
    )
}

/// I -> N1, I -> N2 with equal chain sums
#[allow(dead_code)]
pub fn tie_fan() -> (ItemArena<AutomatonCell>, WeightedNeighborhood) {
    (
        cells(&[1.0, 2.0, 2.0]),
        neighborhood(3, &[(0, 1.0, 1), (0, 1.0, 2)]),
    )
}

/// `n_layers` layers of `width` hits; every hit links to every hit on the
/// next layer with a weight falling off with the position difference
#[allow(dead_code)]
pub fn layered_hits(n_layers: u32, width: u32) -> (ItemArena<Hit>, WeightedNeighborhood) {
    let mut arena = ItemArena::new();
    for layer in 0..n_layers {
        for slot in 0..width {
            let mut hit = Hit::new(layer, slot as f64);
            hit.cell.set_cell_weight(1.0);
            arena.push(hit);
        }
    }

    let candidates: Vec<(ItemId, ItemId)> = arena
        .iter()
        .flat_map(|(from, a)| {
            arena
                .iter()
                .filter(move |(_, b)| b.layer == a.layer + 1)
                .map(move |(to, _)| (from, to))
        })
        .collect();
    let mut filter = |a: &Hit, b: &Hit| Some(1.0 / (1.0 + (a.position - b.position).abs()));
    let hood = WeightedNeighborhood::build_from_candidates(&arena, candidates, &mut filter)
        .expect("candidates inside arena");
    (arena, hood)
}
