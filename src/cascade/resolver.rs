//! Cascade resolution.
//!
//! ## Algorithm
//!
//! 1. Add one unit to the placed cell and give it to the placing competitor.
//! 2. While some cell holds more units than its capacity:
//!    - take the first such cell in row-major order,
//!    - remove `capacity + 1` units from it (unclaimed if it empties),
//!    - give every neighbor one unit and hand it to the exploding owner,
//!    - record the explosion.
//! 3. Stop early after `max_steps` explosions and report an anomaly.
//!
//! Exactly one cell explodes per iteration and the scan always restarts at
//! `(0, 0)`, so every peer applying the same placement to the same grid
//! produces the same event log.

use crate::core::{CompetitorId, DEFAULT_MAX_CASCADE_STEPS};
use crate::error::Result;
use crate::grid::{Coord, Grid};

use super::event::{CascadeAnomaly, CascadeOutcome, ExplosionEvent};

/// Applies placements and settles the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeResolver {
    max_steps: usize,
}

impl Default for CascadeResolver {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_CASCADE_STEPS,
        }
    }
}

impl CascadeResolver {
    /// Create a resolver with a custom step bound (at least 1).
    #[must_use]
    pub fn new(max_steps: usize) -> Self {
        Self {
            max_steps: max_steps.max(1),
        }
    }

    /// The step bound.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Validate a placement, apply it and resolve the cascade.
    ///
    /// Rejected placements (`OutOfBounds`, `IllegalOwner`) leave the grid
    /// untouched.
    pub fn apply_placement_and_resolve(
        &self,
        grid: &mut Grid,
        coord: Coord,
        competitor: CompetitorId,
    ) -> Result<CascadeOutcome> {
        grid.check_placement(coord, competitor)?;
        grid.cell_mut(coord).add_unit(competitor);

        let outcome = self.resolve(grid);
        tracing::debug!(
            %coord,
            competitor = competitor.raw(),
            explosions = outcome.explosion_count(),
            "Placement resolved"
        );
        Ok(outcome)
    }

    /// Resolve until settled or the step bound is hit.
    ///
    /// A settled grid yields no events and is left unchanged.
    pub fn resolve(&self, grid: &mut Grid) -> CascadeOutcome {
        let mut events = Vec::new();

        while !grid.is_settled() {
            if events.len() >= self.max_steps {
                let anomaly = CascadeAnomaly {
                    steps: events.len(),
                    unstable: grid.unstable_cells(),
                };
                tracing::warn!(
                    steps = anomaly.steps,
                    unstable = anomaly.unstable.len(),
                    "Cascade step bound reached, grid left unsettled"
                );
                return CascadeOutcome {
                    events,
                    anomaly: Some(anomaly),
                };
            }

            match self.step(grid, events.len()) {
                Some(event) => events.push(event),
                None => break,
            }
        }

        CascadeOutcome {
            events,
            anomaly: None,
        }
    }

    /// Explode the first unstable cell, if any.
    ///
    /// Exposed for tooling that inspects single steps. Live matches go
    /// through [`apply_placement_and_resolve`](Self::apply_placement_and_resolve)
    /// so intermediate states are never observable.
    pub fn step(&self, grid: &mut Grid, step: usize) -> Option<ExplosionEvent> {
        let (origin, owner) = grid.iter().find_map(|(coord, cell)| {
            if cell.units() > grid.capacity_unchecked(coord) {
                cell.owner().map(|owner| (coord, owner))
            } else {
                None
            }
        })?;

        let targets = grid.neighbors(origin);
        // capacity + 1 == neighbor count
        grid.cell_mut(origin).remove_units(targets.len() as u32);
        for &target in &targets {
            grid.cell_mut(target).add_unit(owner);
        }

        Some(ExplosionEvent {
            step,
            origin,
            owner,
            targets,
        })
    }
}
