//! Scoring collaborator traits
//!
//! The automaton does not know any physics. Item quality and pairwise
//! compatibility come from external filters that implement the traits below.
//! A filter rejects by returning `None` (or NaN); otherwise it returns the
//! weight to attach.
//!
//! Closures implement both traits, so simple scorers need no named type:
//!
//! ```
//! use trackca_core::filters::{apply_cell_weights, CellWeightFilter};
//! use trackca_core::model::{AutomatonCell, ItemArena};
//!
//! let mut arena: ItemArena<AutomatonCell> = vec![AutomatonCell::default(); 3].into();
//! let mut filter = |_: &AutomatonCell| Some(1.0);
//! let accepted = apply_cell_weights(&mut arena, &mut filter).unwrap();
//! assert_eq!(accepted, 3);
//! ```

use crate::errors::{Result, TrackCaError};
use crate::model::{CellFlags, HasAutomatonCell, ItemArena};

/// Local, context-free merit of a single item
pub trait CellWeightFilter<T> {
    /// `None` or NaN rejects the item, which is then flagged DO_NOT_USE
    fn cell_weight(&mut self, item: &T) -> Option<f64>;
}

/// Merit of directly linking two items
pub trait RelationFilter<T> {
    /// `None` or NaN means no relation is created for the ordered pair
    fn relation_weight(&mut self, from: &T, to: &T) -> Option<f64>;
}

impl<T, F> CellWeightFilter<T> for F
where
    F: FnMut(&T) -> Option<f64>,
{
    fn cell_weight(&mut self, item: &T) -> Option<f64> {
        self(item)
    }
}

impl<T, F> RelationFilter<T> for F
where
    F: FnMut(&T, &T) -> Option<f64>,
{
    fn relation_weight(&mut self, from: &T, to: &T) -> Option<f64> {
        self(from, to)
    }
}

/// Accepts everything with the same weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantWeight(pub f64);

impl<T> CellWeightFilter<T> for ConstantWeight {
    fn cell_weight(&mut self, _item: &T) -> Option<f64> {
        Some(self.0)
    }
}

impl<T> RelationFilter<T> for ConstantWeight {
    fn relation_weight(&mut self, _from: &T, _to: &T) -> Option<f64> {
        Some(self.0)
    }
}

/// Rejects every pair
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

impl<T> RelationFilter<T> for RejectAll {
    fn relation_weight(&mut self, _from: &T, _to: &T) -> Option<f64> {
        None
    }
}

/// Normalize a filter verdict: NaN is a rejection
pub(crate) fn accepted_weight(weight: Option<f64>) -> Option<f64> {
    weight.filter(|w| !w.is_nan())
}

/// Run an item-quality filter over the arena
///
/// Items already flagged DO_NOT_USE are skipped. Rejected items get
/// DO_NOT_USE; accepted ones get their cell weight.
///
/// # Returns
/// Number of accepted items
///
/// # Errors
/// * `NonFiniteWeight` - If the filter returned an infinite weight
pub fn apply_cell_weights<T, F>(arena: &mut ItemArena<T>, filter: &mut F) -> Result<usize>
where
    T: HasAutomatonCell,
    F: CellWeightFilter<T> + ?Sized,
{
    let mut accepted = 0;
    for (id, item) in arena.iter_mut() {
        if item.automaton_cell().has_any_flags(CellFlags::DO_NOT_USE) {
            continue;
        }
        match accepted_weight(filter.cell_weight(item)) {
            Some(weight) if weight.is_infinite() => {
                return Err(TrackCaError::NonFiniteWeight {
                    what: "cell",
                    item_id: id,
                    value: weight,
                });
            }
            Some(weight) => {
                item.automaton_cell_mut().set_cell_weight(weight);
                accepted += 1;
            }
            None => item.automaton_cell_mut().set_flags(CellFlags::DO_NOT_USE),
        }
    }
    Ok(accepted)
}
