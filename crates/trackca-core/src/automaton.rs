//! The cellular automaton phases
//!
//! The phases run in a fixed order on one event's graph:
//!
//! 1. `relaxation::relax` computes the final cell state of every usable item
//!    and flags cyclic items.
//! 2. `seeds::mark_seeds` flags the legal path starts.
//! 3. `path_follower::follow_all` / `follow_single` extract the maximal-weight
//!    chains from the starts.
//! 4. `overlap::remove_subset_paths` optionally drops candidates contained in
//!    a better one.
//!
//! None of the phases can fail. Anomalies show up as flags (IS_CYCLE) or as
//! empty results.

pub mod overlap;
pub mod path_follower;
pub mod relaxation;
pub mod seeds;

pub use overlap::{path_quality, remove_subset_paths};
pub use path_follower::{follow_all, follow_single, highest_neighbors, is_highest_neighbor};
pub use relaxation::{chain_value, relax, RelaxationReport};
pub use seeds::mark_seeds;
