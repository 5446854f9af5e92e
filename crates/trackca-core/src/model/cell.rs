use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Additive status bits of an automaton cell
///
/// Flags are only ever added by the algorithm phases. They are removed by an
/// explicit reset at the start of an event or of a multipass pass. The
/// relaxation itself only renews the flags it owns (IS_ASSIGNED, IS_CYCLE).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellFlags(u8);

impl CellFlags {
    /// No flag set
    pub const EMPTY: CellFlags = CellFlags(0);
    /// The cell state is final for the current relaxation
    pub const IS_ASSIGNED: CellFlags = CellFlags(1 << 0);
    /// The item is a legal path start
    pub const IS_START: CellFlags = CellFlags(1 << 1);
    /// The item takes part in a cyclic relation chain
    pub const IS_CYCLE: CellFlags = CellFlags(1 << 2);
    /// The item was blocked by upstream filtering or by an earlier pass
    pub const DO_NOT_USE: CellFlags = CellFlags(1 << 3);

    /// Flags that exclude an item from relaxation and from every path
    pub const EXCLUDED: CellFlags = CellFlags(Self::IS_CYCLE.0 | Self::DO_NOT_USE.0);

    /// Flags owned by the relaxation engine
    pub const RELAXATION: CellFlags = CellFlags(Self::IS_ASSIGNED.0 | Self::IS_CYCLE.0);

    /// Flags owned by one relaxation/seeding/following cycle
    pub const TEMPORARY: CellFlags =
        CellFlags(Self::IS_ASSIGNED.0 | Self::IS_START.0 | Self::IS_CYCLE.0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any bit of `mask` is set
    pub const fn intersects(self, mask: CellFlags) -> bool {
        self.0 & mask.0 != 0
    }

    /// True if every bit of `mask` is set
    pub const fn contains(self, mask: CellFlags) -> bool {
        self.0 & mask.0 == mask.0
    }

    fn insert(&mut self, mask: CellFlags) {
        self.0 |= mask.0;
    }

    fn remove(&mut self, mask: CellFlags) {
        self.0 &= !mask.0;
    }
}

impl BitOr for CellFlags {
    type Output = CellFlags;

    fn bitor(self, rhs: CellFlags) -> CellFlags {
        CellFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellFlags {
    fn bitor_assign(&mut self, rhs: CellFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (CellFlags::IS_ASSIGNED, "IS_ASSIGNED"),
            (CellFlags::IS_START, "IS_START"),
            (CellFlags::IS_CYCLE, "IS_CYCLE"),
            (CellFlags::DO_NOT_USE, "DO_NOT_USE"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            write!(f, "CellFlags(EMPTY)")
        } else {
            write!(f, "CellFlags({})", set.join(" | "))
        }
    }
}

/// Mutable per-item scratch record of the cellular automaton
///
/// `cell_weight` is the local, context-free merit of the item and is set once
/// before relaxation. `cell_state` is the best cumulative merit of any outward
/// chain rooted at the item and is written by the relaxation engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AutomatonCell {
    cell_weight: f64,
    cell_state: f64,
    flags: CellFlags,
}

impl AutomatonCell {
    /// Create a cell with the given weight, zero state and no flags
    pub fn new(cell_weight: f64) -> Self {
        Self {
            cell_weight,
            cell_state: 0.0,
            flags: CellFlags::EMPTY,
        }
    }

    pub fn cell_weight(&self) -> f64 {
        self.cell_weight
    }

    pub fn set_cell_weight(&mut self, weight: f64) {
        self.cell_weight = weight;
    }

    pub fn cell_state(&self) -> f64 {
        self.cell_state
    }

    pub fn set_cell_state(&mut self, state: f64) {
        self.cell_state = state;
    }

    pub fn flags(&self) -> CellFlags {
        self.flags
    }

    pub fn has_any_flags(&self, mask: CellFlags) -> bool {
        self.flags.intersects(mask)
    }

    pub fn has_all_flags(&self, mask: CellFlags) -> bool {
        self.flags.contains(mask)
    }

    pub fn set_flags(&mut self, mask: CellFlags) {
        self.flags.insert(mask);
    }

    pub fn clear_flags(&mut self, mask: CellFlags) {
        self.flags.remove(mask);
    }

    /// Neither blocked nor part of a cycle
    pub fn is_usable(&self) -> bool {
        !self.has_any_flags(CellFlags::EXCLUDED)
    }

    pub fn is_start(&self) -> bool {
        self.has_any_flags(CellFlags::IS_START)
    }

    pub fn is_assigned(&self) -> bool {
        self.has_any_flags(CellFlags::IS_ASSIGNED)
    }

    pub fn is_cycle(&self) -> bool {
        self.has_any_flags(CellFlags::IS_CYCLE)
    }

    /// Initialize the cell for a relaxation
    ///
    /// The state starts at the weight and the engine's own flags are dropped.
    /// IS_START and DO_NOT_USE are kept.
    pub fn begin_relaxation(&mut self) {
        self.flags.remove(CellFlags::RELAXATION);
        self.cell_state = self.cell_weight;
    }

    /// Drop the seeding and relaxation flags of a previous pass; DO_NOT_USE survives
    pub fn reset_temporary_flags(&mut self) {
        self.flags.remove(CellFlags::TEMPORARY);
    }

    /// Full event-start reset: clears every flag, the state falls back to the weight
    pub fn reset(&mut self) {
        self.flags = CellFlags::EMPTY;
        self.cell_state = self.cell_weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_additive() {
        let mut cell = AutomatonCell::new(1.0);
        cell.set_flags(CellFlags::IS_START);
        cell.set_flags(CellFlags::DO_NOT_USE);

        assert!(cell.has_all_flags(CellFlags::IS_START | CellFlags::DO_NOT_USE));
        assert!(!cell.is_usable());
    }

    #[test]
    fn test_clear_flags_only_removes_mask() {
        let mut cell = AutomatonCell::new(1.0);
        cell.set_flags(CellFlags::IS_START | CellFlags::IS_CYCLE);
        cell.clear_flags(CellFlags::IS_CYCLE);

        assert!(cell.is_start());
        assert!(!cell.is_cycle());
        assert!(cell.is_usable());
    }

    #[test]
    fn test_reset_temporary_keeps_do_not_use() {
        let mut cell = AutomatonCell::new(2.0);
        cell.set_flags(CellFlags::TEMPORARY | CellFlags::DO_NOT_USE);
        cell.reset_temporary_flags();

        assert_eq!(cell.flags(), CellFlags::DO_NOT_USE);
    }

    #[test]
    fn test_reset_clears_everything_but_weight() {
        let mut cell = AutomatonCell::new(2.0);
        cell.set_cell_state(5.0);
        cell.set_flags(CellFlags::DO_NOT_USE);
        cell.reset();

        assert_eq!(cell.cell_weight(), 2.0);
        assert_eq!(cell.cell_state(), 2.0);
        assert!(cell.flags().is_empty());
    }

    #[test]
    fn test_begin_relaxation_keeps_start_and_block() {
        let mut cell = AutomatonCell::new(1.5);
        cell.set_cell_state(-4.0);
        cell.set_flags(CellFlags::TEMPORARY | CellFlags::DO_NOT_USE);

        cell.begin_relaxation();

        assert_eq!(cell.cell_state(), 1.5);
        assert_eq!(cell.flags(), CellFlags::IS_START | CellFlags::DO_NOT_USE);
    }

    #[test]
    fn test_flags_debug_lists_names() {
        let flags = CellFlags::IS_START | CellFlags::IS_CYCLE;
        assert_eq!(format!("{:?}", flags), "CellFlags(IS_START | IS_CYCLE)");
        assert_eq!(format!("{:?}", CellFlags::EMPTY), "CellFlags(EMPTY)");
    }
}
