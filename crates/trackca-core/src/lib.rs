//! trackca Core - Cellular-automaton linker for track segments
//!
//! This crate turns a directed graph of detector items into track candidates,
//! including:
//! - Automaton cells with weights, states and status flags
//! - Weighted neighborhoods built from caller-supplied filters
//! - Relaxation of the cell states with cycle detection
//! - Seed marking and maximal-weight path following
//! - Removal of candidates contained in a better one
//! - Per-event and multipass drivers with budgets and boundary logging
//! - Post-relaxation invariant checks

pub mod automaton;
pub mod config;
pub mod errors;
pub mod filters;
pub mod logging_facility;
pub mod model;
pub mod multipass;
pub mod neighborhood;
pub mod pipeline;
pub mod rules;

// Re-export commonly used types
pub use automaton::{
    follow_all, follow_single, is_highest_neighbor, mark_seeds, relax, remove_subset_paths,
};
pub use config::{AutomatonConfig, FollowMode};
pub use errors::{ExError, ExErrorKind, Result, TrackCaError};
pub use model::{AutomatonCell, CellFlags, HasAutomatonCell, ItemArena, ItemId, Path};
pub use multipass::{MultipassOutcome, MultipassPathFinder};
pub use neighborhood::WeightedNeighborhood;
pub use pipeline::{EventOutcome, EventPipeline, EventSummary};
