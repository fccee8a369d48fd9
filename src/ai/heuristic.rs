//! Placement scoring for computer-controlled competitors.
//!
//! A score is a sum of independent terms:
//!
//! | Term          | Condition                                          | Default |
//! |---------------|----------------------------------------------------|---------|
//! | consolidation | candidate already owned by us                      | +10     |
//! | ready         | `units == capacity`                                | +25     |
//! | primed        | `units == capacity - 1`                            | +15     |
//! | corner / edge | position class                                     | +8 / +4 |
//! | attackable    | per opponent neighbor with units                   | +5      |
//! | strike        | per opponent neighbor, when candidate is ready     | +10     |
//! | threatened    | per opponent neighbor at its own capacity          | -8      |
//! | jitter        | uniform in `[0, jitter)`                           | 3.0     |

use serde::{Deserialize, Serialize};

use crate::core::{CompetitorId, GameRng};
use crate::error::Result;
use crate::grid::{CellKind, Coord, Grid};

/// Scoring constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Candidate is already ours.
    pub consolidation: f64,
    /// Candidate is at capacity and explodes on placement.
    pub ready: f64,
    /// Candidate is one unit below capacity.
    pub primed: f64,
    /// Candidate is a corner.
    pub corner: f64,
    /// Candidate is on an edge.
    pub edge: f64,
    /// Per opponent-owned neighbor.
    pub attackable: f64,
    /// Per opponent-owned neighbor, when the candidate is ready.
    pub strike: f64,
    /// Per opponent-owned neighbor that is itself at capacity.
    pub threatened: f64,
    /// Exclusive upper bound of the random jitter added to every score.
    pub jitter: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            consolidation: 10.0,
            ready: 25.0,
            primed: 15.0,
            corner: 8.0,
            edge: 4.0,
            attackable: 5.0,
            strike: 10.0,
            threatened: -8.0,
            jitter: 3.0,
        }
    }
}

impl HeuristicWeights {
    /// Same weights without jitter, for reproducible ranking.
    #[must_use]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = 0.0;
        self
    }
}

/// Deterministic part of a placement score.
pub fn static_score(
    grid: &Grid,
    coord: Coord,
    competitor: CompetitorId,
    weights: &HeuristicWeights,
) -> Result<f64> {
    grid.cell_at(coord)?;
    Ok(score_in_bounds(grid, coord, competitor, weights))
}

/// `static_score` for a coordinate already known to be on the grid.
pub(crate) fn score_in_bounds(
    grid: &Grid,
    coord: Coord,
    competitor: CompetitorId,
    weights: &HeuristicWeights,
) -> f64 {
    let cell = grid.cell(coord);
    let capacity = grid.capacity_unchecked(coord);
    let units = cell.units();
    let ready = units == capacity;

    let mut score = 0.0;
    if cell.is_owned_by(competitor) {
        score += weights.consolidation;
    }
    if ready {
        score += weights.ready;
    } else if units == capacity.saturating_sub(1) {
        score += weights.primed;
    }
    score += match CellKind::from_capacity(capacity) {
        CellKind::Corner => weights.corner,
        CellKind::Edge => weights.edge,
        CellKind::Interior => 0.0,
    };

    for neighbor in grid.neighbors(coord) {
        let other = grid.cell(neighbor);
        if !other.is_opponent_of(competitor) {
            continue;
        }
        score += weights.attackable;
        if ready {
            score += weights.strike;
        }
        if other.units() == grid.capacity_unchecked(neighbor) {
            score += weights.threatened;
        }
    }

    score
}

/// Full placement score: the static terms plus jitter drawn from `rng`.
pub fn score_move(
    grid: &Grid,
    coord: Coord,
    competitor: CompetitorId,
    weights: &HeuristicWeights,
    rng: &mut GameRng,
) -> Result<f64> {
    let base = static_score(grid, coord, competitor, weights)?;
    Ok(base + rng.jitter(weights.jitter))
}
