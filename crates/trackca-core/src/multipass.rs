//! Iterative extraction of non-overlapping track candidates
//!
//! Each pass relaxes the remaining items, takes the single best start and
//! follows it greedily. The items of the extracted path are then flagged
//! DO_NOT_USE, so the next pass works on what is left. The flags stay on the
//! arena after `find` returns, marking the items that were used.

use std::time::Instant;

use tracing::debug;
use trackca_core_types::{EventContext, PassId};

use crate::automaton::{follow_single, mark_seeds, relax};
use crate::config::AutomatonConfig;
use crate::errors::{ExError, Result, TrackCaError};
use crate::model::{CellFlags, HasAutomatonCell, ItemArena, ItemId, Path};
use crate::neighborhood::WeightedNeighborhood;
use crate::pipeline::check_relations_in_arena;
use crate::{log_op_end, log_op_error, log_op_start};

/// Paths of a multipass search, best first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipassOutcome {
    pub paths: Vec<Path>,
    /// Passes run, including the last one that found nothing
    pub n_passes: usize,
}

/// Repeated relax / seed / extract over one event
#[derive(Debug, Clone)]
pub struct MultipassPathFinder {
    config: AutomatonConfig,
}

impl MultipassPathFinder {
    /// # Errors
    /// * `InvalidConfig` - If the configuration is out of range
    pub fn new(config: AutomatonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    /// Extract non-overlapping paths until no start is left
    ///
    /// A pass stops the search when it finds no start, when its path is
    /// shorter than `min_path_length`, or when `max_passes` passes have run.
    ///
    /// # Errors
    /// * `UnknownItem` - If a relation refers to an item outside the arena
    /// * `BudgetExceeded` - If a pass finds more seeds than `max_seeds`
    pub fn find<T: HasAutomatonCell>(
        &self,
        ctx: &EventContext,
        arena: &mut ItemArena<T>,
        neighborhood: &WeightedNeighborhood,
    ) -> Result<MultipassOutcome> {
        log_op_start!(
            "find_multipass",
            event_id = %ctx.event_id,
            n_items = arena.len(),
            n_relations = neighborhood.len()
        );
        let start = Instant::now();

        let outcome = self.find_impl(ctx, arena, neighborhood).map_err(|e| {
            log_op_error!(
                "find_multipass",
                ExError::from(e.clone()).with_event_id(ctx.event_id.clone()),
                duration_ms = start.elapsed().as_millis() as u64,
                event_id = %ctx.event_id
            );
            e
        })?;

        log_op_end!(
            "find_multipass",
            duration_ms = start.elapsed().as_millis() as u64,
            event_id = %ctx.event_id,
            n_passes = outcome.n_passes,
            n_paths = outcome.paths.len()
        );
        Ok(outcome)
    }

    fn find_impl<T: HasAutomatonCell>(
        &self,
        ctx: &EventContext,
        arena: &mut ItemArena<T>,
        neighborhood: &WeightedNeighborhood,
    ) -> Result<MultipassOutcome> {
        check_relations_in_arena(arena, neighborhood)?;

        let mut paths = Vec::new();
        let mut pass_id = PassId::FIRST;
        let mut n_passes = 0;

        while n_passes < self.config.max_passes {
            n_passes += 1;
            let pass_ctx = ctx.clone().with_pass_id(pass_id);
            match self.run_pass(&pass_ctx, arena, neighborhood)? {
                Some(path) => paths.push(path),
                None => break,
            }
            pass_id = pass_id.next();
        }

        Ok(MultipassOutcome { paths, n_passes })
    }

    /// Extract the best path among the items left
    ///
    /// Seeds of the previous pass are dropped first. Returns `None` when the
    /// search is over; otherwise the items of the returned path are flagged
    /// DO_NOT_USE.
    fn run_pass<T: HasAutomatonCell>(
        &self,
        ctx: &EventContext,
        arena: &mut ItemArena<T>,
        neighborhood: &WeightedNeighborhood,
    ) -> Result<Option<Path>> {
        let pass_id = ctx.pass_id.unwrap_or(PassId::FIRST);
        let min_state = self.config.follow_threshold();

        for (_, item) in arena.iter_mut() {
            item.automaton_cell_mut().reset_temporary_flags();
        }
        relax(arena, neighborhood);
        let n_seeds = mark_seeds(
            arena,
            neighborhood,
            self.config.strict_seeding,
            self.config.seed_threshold(),
        );
        if let Some(limit) = self.config.max_seeds {
            if n_seeds > limit {
                return Err(TrackCaError::BudgetExceeded {
                    what: "seeds",
                    limit,
                    found: n_seeds,
                });
            }
        }

        let Some(best) = best_start(arena, min_state) else {
            debug!(event_id = %ctx.event_id, pass_id = %pass_id, "no start left");
            return Ok(None);
        };
        let mut path = Vec::new();
        if !follow_single(arena, neighborhood, best, &mut path, min_state) {
            return Ok(None);
        }
        if path.len() < self.config.min_path_length {
            debug!(
                event_id = %ctx.event_id,
                pass_id = %pass_id,
                path_len = path.len(),
                "best path too short"
            );
            return Ok(None);
        }

        for &id in &path {
            arena[id].automaton_cell_mut().set_flags(CellFlags::DO_NOT_USE);
        }
        debug!(
            event_id = %ctx.event_id,
            pass_id = %pass_id,
            n_seeds,
            path_len = path.len(),
            "path extracted"
        );
        Ok(Some(path))
    }
}

/// Usable start with the highest state; the first in arena order on ties
fn best_start<T: HasAutomatonCell>(arena: &ItemArena<T>, min_state: f64) -> Option<ItemId> {
    let mut best: Option<(ItemId, f64)> = None;
    for (id, item) in arena.iter() {
        let cell = item.automaton_cell();
        if !cell.is_start() || !cell.is_usable() || cell.cell_state() < min_state {
            continue;
        }
        if best.map_or(true, |(_, state)| cell.cell_state() > state) {
            best = Some((id, cell.cell_state()));
        }
    }
    best.map(|(id, _)| id)
}
