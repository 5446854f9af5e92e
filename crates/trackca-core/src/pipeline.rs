//! Per-event driver: relax, seed, follow
//!
//! ## Logging Ownership
//!
//! `EventPipeline::run` owns the boundary events of an event:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success, with the summary counts
//! - `log_op_error!` on failure
//!
//! The phases below it use only `tracing::debug!()`.

use std::ops::ControlFlow;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;
use trackca_core_types::{EventContext, EventId};

use crate::automaton::path_follower::walk_all;
use crate::automaton::{follow_all, follow_single, mark_seeds, relax, remove_subset_paths};
use crate::config::{AutomatonConfig, FollowMode};
use crate::errors::{ExError, Result, TrackCaError};
use crate::model::{HasAutomatonCell, ItemArena, Path};
use crate::neighborhood::WeightedNeighborhood;
use crate::{log_op_end, log_op_error, log_op_start};

/// Diagnostic counts of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub event_id: EventId,
    pub n_items: usize,
    pub n_relations: usize,
    pub n_rounds: usize,
    pub n_cycle: usize,
    pub n_seeds: usize,
    pub n_paths: usize,
}

impl EventSummary {
    /// Serialize the summary as one JSON object
    ///
    /// # Errors
    /// * `Serialization` - If encoding fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Paths of one event together with its summary
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    /// Track candidates in enumeration order
    pub paths: Vec<Path>,
    pub summary: EventSummary,
}

/// Runs the automaton phases over one event
#[derive(Debug, Clone)]
pub struct EventPipeline {
    config: AutomatonConfig,
}

impl EventPipeline {
    /// Create a pipeline from a validated configuration
    ///
    /// # Errors
    /// * `InvalidConfig` - If the configuration is out of range
    pub fn new(config: AutomatonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    /// Process one event
    ///
    /// Relaxes the arena, marks the seeds and extracts the paths according to
    /// the configured follow mode. Paths shorter than `min_path_length` are
    /// dropped, then, with `clean_overlapping_set`, every path contained in a
    /// better one. The cell states and flags stay on the arena for inspection.
    ///
    /// # Arguments
    /// * `ctx` - Correlation context; its event id ends up in the logs and the summary
    /// * `arena` - Items of the event with their cell weights set
    /// * `neighborhood` - Relations between the items
    ///
    /// # Errors
    /// * `UnknownItem` - If a relation refers to an item outside the arena
    /// * `BudgetExceeded` - If more seeds or paths than allowed were found
    pub fn run<T: HasAutomatonCell>(
        &self,
        ctx: &EventContext,
        arena: &mut ItemArena<T>,
        neighborhood: &WeightedNeighborhood,
    ) -> Result<EventOutcome> {
        log_op_start!(
            "run_event",
            event_id = %ctx.event_id,
            n_items = arena.len(),
            n_relations = neighborhood.len()
        );
        let start = Instant::now();

        let outcome = self.run_impl(ctx, arena, neighborhood).map_err(|e| {
            log_op_error!(
                "run_event",
                ExError::from(e.clone()).with_event_id(ctx.event_id.clone()),
                duration_ms = start.elapsed().as_millis() as u64,
                event_id = %ctx.event_id
            );
            e
        })?;

        let summary = &outcome.summary;
        log_op_end!(
            "run_event",
            duration_ms = start.elapsed().as_millis() as u64,
            event_id = %ctx.event_id,
            n_rounds = summary.n_rounds,
            n_cycle = summary.n_cycle,
            n_seeds = summary.n_seeds,
            n_paths = summary.n_paths
        );

        Ok(outcome)
    }

    fn run_impl<T: HasAutomatonCell>(
        &self,
        ctx: &EventContext,
        arena: &mut ItemArena<T>,
        neighborhood: &WeightedNeighborhood,
    ) -> Result<EventOutcome> {
        check_relations_in_arena(arena, neighborhood)?;

        let report = relax(arena, neighborhood);
        let n_seeds = mark_seeds(
            arena,
            neighborhood,
            self.config.strict_seeding,
            self.config.seed_threshold(),
        );
        check_budget("seeds", self.config.max_seeds, n_seeds)?;

        let min_state = self.config.follow_threshold();
        let mut paths = match self.config.follow_mode {
            FollowMode::All => {
                if let Some(limit) = self.config.max_paths {
                    let cap = limit.saturating_add(1);
                    let found = count_paths_up_to(arena, neighborhood, min_state, cap);
                    check_budget("paths", Some(limit), found)?;
                }
                let mut paths = Vec::new();
                follow_all(arena, neighborhood, &mut paths, min_state);
                paths
            }
            FollowMode::Single => {
                let mut paths = Vec::new();
                for id in arena.ids() {
                    let mut path = Vec::new();
                    if follow_single(arena, neighborhood, id, &mut path, min_state) {
                        paths.push(path);
                        check_budget("paths", self.config.max_paths, paths.len())?;
                    }
                }
                paths
            }
        };
        paths.retain(|path| path.len() >= self.config.min_path_length);
        if self.config.clean_overlapping_set {
            remove_subset_paths(arena, &mut paths);
        }

        let summary = EventSummary {
            event_id: ctx.event_id.clone(),
            n_items: arena.len(),
            n_relations: neighborhood.len(),
            n_rounds: report.n_rounds,
            n_cycle: report.n_cycle,
            n_seeds,
            n_paths: paths.len(),
        };
        Ok(EventOutcome { paths, summary })
    }
}

/// Number of `follow_all` paths, counting stops at `cap`
pub(crate) fn count_paths_up_to<T: HasAutomatonCell>(
    arena: &ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
    min_state_to_follow: f64,
    cap: usize,
) -> usize {
    let mut count = 0;
    let walk = walk_all(arena, neighborhood, min_state_to_follow, |_| {
        count += 1;
        if count >= cap {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    match walk {
        ControlFlow::Break(()) => debug!(cap, "path count capped"),
        ControlFlow::Continue(()) => debug!(n_paths = count, "paths counted"),
    }
    count
}

fn check_budget(what: &'static str, limit: Option<usize>, found: usize) -> Result<()> {
    match limit {
        Some(limit) if found > limit => Err(TrackCaError::BudgetExceeded { what, limit, found }),
        _ => Ok(()),
    }
}

pub(crate) fn check_relations_in_arena<T>(
    arena: &ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
) -> Result<()> {
    let outside = neighborhood
        .relations()
        .flat_map(|(from, _, to)| [from, to])
        .find(|id| !arena.contains(*id));
    match outside {
        Some(item_id) => Err(TrackCaError::UnknownItem {
            item_id,
            n_items: arena.len(),
        }),
        None => Ok(()),
    }
}
