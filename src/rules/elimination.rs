//! Liveness and winner detection.
//!
//! Liveness is never stored. A competitor is alive exactly when it owns a
//! cell with units on the current grid, and every query re-derives that
//! from the grid, so turn logic cannot drift from board contents.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CompetitorId, Roster, MAX_COMPETITORS};
use crate::grid::Grid;

use super::turn::Phase;

/// Result of evaluating a settled grid for a winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Match continues.
    Undecided,
    /// Exactly one competitor is alive.
    Survivor(CompetitorId),
    /// Nobody is alive. Unreachable under mass conservation; the first
    /// roster entry is declared so the match cannot get stuck.
    Degenerate(CompetitorId),
}

impl Verdict {
    /// Declared winner, if any.
    #[must_use]
    pub fn winner(self) -> Option<CompetitorId> {
        match self {
            Verdict::Undecided => None,
            Verdict::Survivor(id) | Verdict::Degenerate(id) => Some(id),
        }
    }
}

/// Roster entries owning at least one cell with units, in roster order.
#[must_use]
pub fn alive_competitors(grid: &Grid, roster: &Roster) -> SmallVec<[CompetitorId; MAX_COMPETITORS]> {
    roster.iter().filter(|&id| grid.owns_any(id)).collect()
}

/// Evaluate the grid after `moves_made` completed placements.
///
/// Nobody can win during the first round.
pub fn evaluate(grid: &Grid, roster: &Roster, moves_made: u64) -> Verdict {
    if Phase::of(moves_made, roster) == Phase::FirstRound {
        return Verdict::Undecided;
    }

    let alive = alive_competitors(grid, roster);
    match alive.as_slice() {
        [only] => Verdict::Survivor(*only),
        [] => match roster.first() {
            Some(fallback) => {
                tracing::error!(
                    moves_made,
                    fallback = fallback.raw(),
                    total_units = grid.total_units(),
                    "No competitor alive in steady state; declaring first roster entry"
                );
                Verdict::Degenerate(fallback)
            }
            None => Verdict::Undecided,
        },
        _ => Verdict::Undecided,
    }
}

/// Winner after `moves_made` completed placements, if any.
pub fn check_winner(grid: &Grid, roster: &Roster, moves_made: u64) -> Option<CompetitorId> {
    evaluate(grid, roster, moves_made).winner()
}
