//! Weighted neighborhood graph
//!
//! A directed multigraph `item -> [(relation weight, neighbor)]` stored as one
//! adjacency list per item. The order of the neighbors of an item is the
//! insertion order; every phase that has to break a tie between neighbors
//! uses this order.
//!
//! The neighborhood is built once per event, either relation by relation
//! through `insert`, or by running a `RelationFilter` over item pairs, and is
//! read-only afterwards.

use crate::errors::{Result, TrackCaError};
use crate::filters::{accepted_weight, RelationFilter};
use crate::model::{CellFlags, HasAutomatonCell, ItemArena, ItemId};

/// One outgoing edge: `to` may directly extend the chain of the owning item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborRelation {
    pub weight: f64,
    pub to: ItemId,
}

/// Insertion-ordered adjacency lists over an item arena
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedNeighborhood {
    adjacency: Vec<Vec<NeighborRelation>>,
    n_relations: usize,
}

impl WeightedNeighborhood {
    /// Create an empty neighborhood for `n_items` items
    pub fn new(n_items: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); n_items],
            n_relations: 0,
        }
    }

    /// Number of items the neighborhood was sized for
    pub fn n_items(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of relations
    pub fn len(&self) -> usize {
        self.n_relations
    }

    pub fn is_empty(&self) -> bool {
        self.n_relations == 0
    }

    /// Add the relation `from -> to`
    ///
    /// Duplicate relations are kept; self relations are accepted and are
    /// later flagged as cycles by the relaxation.
    ///
    /// # Errors
    /// * `UnknownItem` - If either end is outside the neighborhood
    /// * `NonFiniteWeight` - If the weight is NaN or infinite
    pub fn insert(&mut self, from: ItemId, weight: f64, to: ItemId) -> Result<()> {
        let n_items = self.n_items();
        for id in [from, to] {
            if id.index() >= n_items {
                return Err(TrackCaError::UnknownItem {
                    item_id: id,
                    n_items,
                });
            }
        }
        if !weight.is_finite() {
            return Err(TrackCaError::NonFiniteWeight {
                what: "relation",
                item_id: from,
                value: weight,
            });
        }

        self.adjacency[from.index()].push(NeighborRelation { weight, to });
        self.n_relations += 1;
        Ok(())
    }

    /// Outgoing relations of `item` in insertion order
    ///
    /// Unknown items have no neighbors.
    pub fn neighbors(&self, item: ItemId) -> &[NeighborRelation] {
        self.adjacency
            .get(item.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Outgoing `(relation weight, neighbor)` pairs of `item` in insertion order
    pub fn outgoing_of(&self, item: ItemId) -> impl Iterator<Item = (f64, ItemId)> + '_ {
        self.neighbors(item).iter().map(|rel| (rel.weight, rel.to))
    }

    pub fn out_degree(&self, item: ItemId) -> usize {
        self.neighbors(item).len()
    }

    pub fn has_relation(&self, from: ItemId, to: ItemId) -> bool {
        self.neighbors(from).iter().any(|rel| rel.to == to)
    }

    /// Every relation as `(from, weight, to)`, ordered by `from` then insertion
    pub fn relations(&self) -> impl Iterator<Item = (ItemId, f64, ItemId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(idx, rels)| {
            let from = ItemId::new(idx as u32);
            rels.iter().map(move |rel| (from, rel.weight, rel.to))
        })
    }

    /// Evaluate every ordered pair of distinct usable items
    ///
    /// Pairs are visited in `(from, to)` order, which fixes the neighbor
    /// order. Items flagged DO_NOT_USE take part in no relation.
    ///
    /// # Errors
    /// * `NonFiniteWeight` - If the filter returned an infinite weight
    pub fn build_all_pairs<T, F>(arena: &ItemArena<T>, filter: &mut F) -> Result<Self>
    where
        T: HasAutomatonCell,
        F: RelationFilter<T> + ?Sized,
    {
        let usable: Vec<ItemId> = arena
            .iter()
            .filter(|(_, item)| !item.automaton_cell().has_any_flags(CellFlags::DO_NOT_USE))
            .map(|(id, _)| id)
            .collect();

        let pairs = usable.iter().flat_map(|&from| {
            usable
                .iter()
                .filter(move |&&to| to != from)
                .map(move |&to| (from, to))
        });
        Self::build_from_candidates(arena, pairs, filter)
    }

    /// Evaluate caller-supplied candidate pairs
    ///
    /// Typically the candidates come from a geometric pre-selection (e.g.
    /// items on adjacent layers). Pairs touching a DO_NOT_USE item are
    /// skipped without consulting the filter.
    ///
    /// # Errors
    /// * `UnknownItem` - If a candidate refers to an item outside the arena
    /// * `NonFiniteWeight` - If the filter returned an infinite weight
    pub fn build_from_candidates<T, F, I>(
        arena: &ItemArena<T>,
        candidates: I,
        filter: &mut F,
    ) -> Result<Self>
    where
        T: HasAutomatonCell,
        F: RelationFilter<T> + ?Sized,
        I: IntoIterator<Item = (ItemId, ItemId)>,
    {
        let mut neighborhood = Self::new(arena.len());
        for (from, to) in candidates {
            let (from_item, to_item) = match (arena.get(from), arena.get(to)) {
                (Some(f), Some(t)) => (f, t),
                (None, _) => {
                    return Err(TrackCaError::UnknownItem {
                        item_id: from,
                        n_items: arena.len(),
                    })
                }
                (_, None) => {
                    return Err(TrackCaError::UnknownItem {
                        item_id: to,
                        n_items: arena.len(),
                    })
                }
            };
            if from_item.automaton_cell().has_any_flags(CellFlags::DO_NOT_USE)
                || to_item.automaton_cell().has_any_flags(CellFlags::DO_NOT_USE)
            {
                continue;
            }
            if let Some(weight) = accepted_weight(filter.relation_weight(from_item, to_item)) {
                neighborhood.insert(from, weight, to)?;
            }
        }

        tracing::debug!(
            n_items = arena.len(),
            n_relations = neighborhood.len(),
            "neighborhood built"
        );
        Ok(neighborhood)
    }
}
