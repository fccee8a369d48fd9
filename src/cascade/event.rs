//! Cascade results: the ordered explosion log and the anomaly report.

use serde::{Deserialize, Serialize};

use crate::core::CompetitorId;
use crate::grid::{Coord, Neighbors};

/// One explosion within a cascade.
///
/// Hosts replay these in `step` order to animate a placement; the grid they
/// receive alongside is already the final state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionEvent {
    /// Position of this explosion within its cascade (0-based).
    pub step: usize,
    /// Cell that exploded.
    pub origin: Coord,
    /// Owner of the origin at explosion time; every target now belongs to it.
    pub owner: CompetitorId,
    /// Neighbors that received one unit each.
    pub targets: Neighbors,
}

/// Cascade cut short by the step bound.
///
/// Non-fatal: the grid is left as it was after the last explosion, which
/// may still hold over-capacity cells. Hosts should log it and carry on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeAnomaly {
    /// Explosions performed before stopping.
    pub steps: usize,
    /// Cells still over capacity, row-major.
    pub unstable: Vec<Coord>,
}

/// Everything a placement produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    /// Explosions in the order they were applied.
    pub events: Vec<ExplosionEvent>,
    /// Set when the step bound was hit.
    pub anomaly: Option<CascadeAnomaly>,
}

impl CascadeOutcome {
    /// Number of explosions.
    #[must_use]
    pub fn explosion_count(&self) -> usize {
        self.events.len()
    }

    /// True when the cascade ran to a settled grid.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.anomaly.is_none()
    }

    /// Cells that changed hands or gained units, in first-touch order.
    #[must_use]
    pub fn touched_cells(&self) -> Vec<Coord> {
        let mut seen = Vec::new();
        for event in &self.events {
            for &coord in std::iter::once(&event.origin).chain(event.targets.iter()) {
                if !seen.contains(&coord) {
                    seen.push(coord);
                }
            }
        }
        seen
    }
}
