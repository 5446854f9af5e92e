//! Index-based per-event item pool.
//!
//! Items are owned by the caller's `ItemArena` and addressed by `ItemId`, a
//! dense index. The neighborhood and every produced `Path` refer to items only
//! through these handles.
//!
//! # Determinism
//! - `ItemId` ordering is by its inner `u32`, which is the insertion order.
//! - Every algorithm phase iterates items in `ItemId` order.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::cell::AutomatonCell;

/// Dense item handle into an `ItemArena`
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One track candidate: ordered item handles, head = start item
pub type Path = Vec<ItemId>;

/// Access to the automaton cell attached to an item payload
///
/// Implemented by every item type the automaton runs on. The cell itself
/// implements it, so a bare `ItemArena<AutomatonCell>` works too.
pub trait HasAutomatonCell {
    fn automaton_cell(&self) -> &AutomatonCell;
    fn automaton_cell_mut(&mut self) -> &mut AutomatonCell;
}

impl HasAutomatonCell for AutomatonCell {
    fn automaton_cell(&self) -> &AutomatonCell {
        self
    }

    fn automaton_cell_mut(&mut self) -> &mut AutomatonCell {
        self
    }
}

/// Contiguous per-event item storage
#[derive(Debug, Clone, PartialEq)]
pub struct ItemArena<T> {
    items: Vec<T>,
}

impl<T> ItemArena<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append an item and return its handle
    pub fn push(&mut self, item: T) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(item);
        id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        id.index() < self.items.len()
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.get(id.index())
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.items.get_mut(id.index())
    }

    /// All handles in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ItemId> {
        (0..self.items.len() as u32).map(ItemId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| (ItemId(idx as u32), item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(idx, item)| (ItemId(idx as u32), item))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: HasAutomatonCell> ItemArena<T> {
    /// Cell of an item, `None` for handles outside the arena
    pub fn cell(&self, id: ItemId) -> Option<&AutomatonCell> {
        self.get(id).map(HasAutomatonCell::automaton_cell)
    }

    pub fn cell_mut(&mut self, id: ItemId) -> Option<&mut AutomatonCell> {
        self.get_mut(id).map(HasAutomatonCell::automaton_cell_mut)
    }

    /// Event-start reset of every cell
    pub fn reset_cells(&mut self) {
        for item in &mut self.items {
            item.automaton_cell_mut().reset();
        }
    }
}

impl<T> Default for ItemArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ItemArena<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for ItemArena<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Index<ItemId> for ItemArena<T> {
    type Output = T;

    fn index(&self, id: ItemId) -> &T {
        &self.items[id.index()]
    }
}

impl<T> IndexMut<ItemId> for ItemArena<T> {
    fn index_mut(&mut self, id: ItemId) -> &mut T {
        &mut self.items[id.index()]
    }
}
