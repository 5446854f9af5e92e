pub mod arena;
pub mod cell;

pub use arena::{HasAutomatonCell, ItemArena, ItemId, Path};
pub use cell::{AutomatonCell, CellFlags};
