use crate::config::{MaxCost, PropagationConfig};
use crate::coord::GridCoord;
use crate::cost_map::{step_cost, CostMap, DirectionWeights};
use crate::cost_surface::CostSurface;
use crate::error::{PropagationError, Result};
use crate::frontier::{CostCell, Frontier};
use crate::seeds::Seed;

/// Counters describing the last run of a [Propagator].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PropagationStats {
    /// Seeds that were written to the surface.
    pub seeded: usize,
    /// Entries popped and expanded.
    pub processed: usize,
    /// Entries popped and dropped because a cheaper cost was already known.
    pub stale_discarded: usize,
    /// Entries pushed onto the frontier, seeds included.
    pub inserted: usize,
    /// Candidates dropped because they exceeded the cost ceiling.
    pub ceiling_pruned: usize,
    /// Whether the loop stopped at an entry above the cost ceiling.
    pub ceiling_reached: bool,
    /// Frontier consistency problems seen during the run.
    pub invariant_warnings: usize,
}

/// Struct for running cost propagation over a [CostMap].
///
/// Keeps its frontier between runs so it can be re-used to avoid
/// allocations.
///
/// # Example
/// ```rust
/// use multicost::*;
///
/// let map = CostMap2d::new(3, 3);
/// let mut propagator = Propagator::new();
/// let surface = propagator
///     .run(&map, &[Seed::at(GridCoord::base(1, 1))], &PropagationConfig::default())
///     .unwrap();
///
/// assert_eq!(Some(1.0), surface.get(GridCoord::base(0, 1)));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Propagator {
    frontier: Frontier,
    stats: PropagationStats,
    max_cost: MaxCost,
}

impl Propagator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a propagator whose frontier starts with room for `len` entries.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            frontier: Frontier::with_capacity(len),
            ..Self::default()
        }
    }

    /// Counters from the most recent run.
    pub fn stats(&self) -> PropagationStats {
        self.stats
    }

    /// Compute the accumulated cost surface reachable from `seeds`.
    pub fn run(
        &mut self,
        map: &impl CostMap,
        seeds: &[Seed],
        config: &PropagationConfig,
    ) -> Result<CostSurface> {
        self.run_observed(map, seeds, config, |_, _| {})
    }

    /// Like [Propagator::run], calling `observer` with every cost written to
    /// the surface, in write order.
    #[tracing::instrument(
        skip_all,
        fields(nrows = map.size().y, ncols = map.size().x, seeds = seeds.len())
    )]
    pub fn run_observed(
        &mut self,
        map: &impl CostMap,
        seeds: &[Seed],
        config: &PropagationConfig,
        mut observer: impl FnMut(GridCoord, f64),
    ) -> Result<CostSurface> {
        config.validate()?;
        let size = map.size();
        if size.x == 0 || size.y == 0 {
            return Err(PropagationError::EmptyGrid);
        }
        if seeds.is_empty() {
            return Err(PropagationError::NoStartPoints);
        }
        if let Some(seed) = seeds
            .iter()
            .find(|s| s.coord.row >= size.y || s.coord.col >= size.x)
        {
            return Err(PropagationError::SeedOutOfBounds {
                row: seed.coord.row,
                col: seed.coord.col,
            });
        }

        let weights = DirectionWeights::new(config.resolution, config.bridge_weight);
        tracing::debug!(
            max_cost = ?config.max_cost.limit(),
            horizontal = weights.horizontal,
            vertical = weights.vertical,
            diagonal = weights.diagonal,
            bridge = weights.bridge,
            "starting propagation"
        );

        self.frontier.clear();
        self.stats = PropagationStats::default();
        self.max_cost = config.max_cost;
        let mut surface = CostSurface::with_size(size);

        for seed in seeds {
            if !seed.cost.is_finite() {
                tracing::debug!(coord = %seed.coord, cost = seed.cost, "skipping non-finite seed");
                continue;
            }
            if self.push(&mut surface, seed.coord, seed.cost, &mut observer) {
                self.stats.seeded += 1;
            }
        }
        if self.stats.seeded == 0 {
            return Err(PropagationError::NoStartPoints);
        }

        let mut last: Option<CostCell> = None;
        while let Some((handle, peeked)) = self.frontier.peek_min() {
            let Some(cell) = self.frontier.remove(handle) else {
                self.stats.invariant_warnings += 1;
                tracing::warn!(
                    coord = %peeked.coord,
                    cost = peeked.cost,
                    "frontier minimum could not be removed"
                );
                break;
            };
            if let Some(problem) = pop_order_violation(last, cell) {
                self.stats.invariant_warnings += 1;
                tracing::warn!(coord = %cell.coord, cost = cell.cost, "{}", problem);
            }
            last = Some(cell);

            if surface.get(cell.coord).is_some_and(|best| best < cell.cost) {
                self.stats.stale_discarded += 1;
                continue;
            }
            if self.max_cost.exceeded_by(cell.cost) {
                self.stats.ceiling_reached = true;
                break;
            }

            self.stats.processed += 1;
            self.expand(map, &weights, &mut surface, cell, &mut observer);
        }

        let peak = surface.peak_cost();
        if self.stats.inserted == self.stats.seeded {
            tracing::info!("no data propagated");
        }
        tracing::info!(
            processed = self.stats.processed,
            stale_discarded = self.stats.stale_discarded,
            inserted = self.stats.inserted,
            ceiling_pruned = self.stats.ceiling_pruned,
            ceiling_reached = self.stats.ceiling_reached,
            peak,
            "propagation finished"
        );
        Ok(surface)
    }

    /// Relax the same-layer neighbors of `cell` and, at a crossover, its
    /// counterpart on the other layer.
    fn expand(
        &mut self,
        map: &impl CostMap,
        weights: &DirectionWeights,
        surface: &mut CostSurface,
        cell: CostCell,
        observer: &mut impl FnMut(GridCoord, f64),
    ) {
        let here = map.cost(cell.coord);

        for (dir, next) in cell.coord.neighbors(map.size()) {
            let step = step_cost(here, map.cost(next), weights.weight(dir));
            self.relax(surface, next, cell.cost, step, observer);
        }

        if map.is_crossover(cell.coord.row, cell.coord.col) {
            let paired = cell.coord.paired();
            let step = step_cost(here, map.cost(paired), weights.bridge);
            self.relax(surface, paired, cell.cost, step, observer);
        }
    }

    /// Offer `coord` at `from + step`. Steps that are not finite or are
    /// negative are treated like no-data and skipped.
    fn relax(
        &mut self,
        surface: &mut CostSurface,
        coord: GridCoord,
        from: f64,
        step: f64,
        observer: &mut impl FnMut(GridCoord, f64),
    ) {
        if !step.is_finite() || step < 0.0 {
            return;
        }
        let candidate = from + step;
        if !candidate.is_finite() {
            return;
        }
        if self.max_cost.exceeded_by(candidate) {
            self.stats.ceiling_pruned += 1;
            return;
        }
        self.push(surface, coord, candidate, observer);
    }

    /// Record `cost` for `coord` if it beats the best known cost, and queue
    /// the cell. Superseded frontier entries are left to go stale.
    fn push(
        &mut self,
        surface: &mut CostSurface,
        coord: GridCoord,
        cost: f64,
        observer: &mut impl FnMut(GridCoord, f64),
    ) -> bool {
        if !surface.improve(coord, cost) {
            return false;
        }
        observer(coord, cost);
        self.frontier.insert(cost, coord);
        self.stats.inserted += 1;
        true
    }
}

/// Popped costs never decrease and the same entry is never popped twice in
/// a row, since every write strictly lowers a cell's cost.
fn pop_order_violation(last: Option<CostCell>, cell: CostCell) -> Option<&'static str> {
    let last = last?;
    if last == cell {
        Some("frontier yielded the entry it just removed")
    } else if cell.cost < last.cost {
        Some("frontier yielded a cost below the previous minimum")
    } else {
        None
    }
}
