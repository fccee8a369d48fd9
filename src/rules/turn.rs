//! Turn order and the match turn state.
//!
//! Turn advancement is a pure function of `(grid, roster, moves_made)`.
//! `TurnState` stores the result but never counts turns independently of
//! completed placements.

use serde::{Deserialize, Serialize};

use crate::core::{CompetitorId, Roster};
use crate::error::{EngineError, Result};
use crate::grid::Grid;

use super::elimination::{alive_competitors, evaluate, Verdict};

/// Turn phase, derived from the number of completed placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Not everyone has placed yet: no eliminations, plain round-robin.
    FirstRound,
    /// Everyone has placed at least once: eliminated competitors are skipped.
    SteadyState,
}

impl Phase {
    /// Phase after `moves_made` completed placements.
    #[must_use]
    pub fn of(moves_made: u64, roster: &Roster) -> Self {
        if moves_made < roster.len() as u64 {
            Phase::FirstRound
        } else {
            Phase::SteadyState
        }
    }
}

/// Competitor to act after `current`.
///
/// First round: round-robin over the full roster. Steady state: round-robin
/// over the competitors alive on `grid`; with a single survivor that
/// survivor is returned, and with none `current` is returned unchanged.
pub fn next_actor(
    current: CompetitorId,
    roster: &Roster,
    grid: &Grid,
    moves_made: u64,
) -> CompetitorId {
    let ids = roster.as_slice();
    if ids.is_empty() {
        return current;
    }
    // Unknown ids start from the top of the roster.
    let start = roster.position(current).unwrap_or(ids.len() - 1);

    match Phase::of(moves_made, roster) {
        Phase::FirstRound => ids[(start + 1) % ids.len()],
        Phase::SteadyState => {
            let alive = alive_competitors(grid, roster);
            (1..=ids.len())
                .map(|offset| ids[(start + offset) % ids.len()])
                .find(|id| alive.contains(id))
                .unwrap_or(current)
        }
    }
}

/// Authoritative turn state for one match.
///
/// Replicated by value across peers; every peer advances it only through
/// [`TurnState::advance`] after applying the same placement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    /// Competitor expected to place next.
    pub current_actor: CompetitorId,
    /// Completed placements (a placement plus its cascade counts once).
    pub moves_made: u64,
    /// Participants in turn order, fixed at match start.
    pub roster: Roster,
    /// Declared winner.
    pub winner: Option<CompetitorId>,
}

impl TurnState {
    /// Fresh turn state: the first roster entry acts first.
    pub fn new(roster: Roster) -> Result<Self> {
        roster.validate()?;
        let current_actor = roster
            .first()
            .ok_or_else(|| EngineError::InvalidConfig("empty roster".to_string()))?;
        Ok(Self {
            current_actor,
            moves_made: 0,
            roster,
            winner: None,
        })
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::of(self.moves_made, &self.roster)
    }

    /// True once a winner is declared.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Record one completed placement on the now-settled `grid`.
    ///
    /// Checks for a winner first; only when there is none does the turn pass.
    pub fn advance(&mut self, grid: &Grid) -> Verdict {
        self.moves_made += 1;
        let verdict = evaluate(grid, &self.roster, self.moves_made);
        match verdict.winner() {
            Some(winner) => self.winner = Some(winner),
            None => {
                self.current_actor = next_actor(self.current_actor, &self.roster, grid, self.moves_made);
            }
        }
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridConfig;
    use crate::grid::{Cell, Coord};

    fn grid() -> Grid {
        Grid::new(GridConfig::default()).unwrap()
    }

    #[test]
    fn test_phase_transition() {
        let roster = Roster::sequential(3).unwrap();
        assert_eq!(Phase::of(0, &roster), Phase::FirstRound);
        assert_eq!(Phase::of(2, &roster), Phase::FirstRound);
        assert_eq!(Phase::of(3, &roster), Phase::SteadyState);
    }

    #[test]
    fn test_first_round_ignores_liveness() {
        let g = grid(); // nobody alive
        let roster = Roster::sequential(4).unwrap();

        let mut actor = CompetitorId(1);
        let mut order = vec![actor];
        for moves in 0..4 {
            actor = next_actor(actor, &roster, &g, moves);
            order.push(actor);
        }
        // The last call (moves = 3) is still first round.
        assert_eq!(order, vec![1, 2, 3, 4, 1].into_iter().map(CompetitorId).collect::<Vec<_>>());
    }

    #[test]
    fn test_steady_state_skips_eliminated() {
        let mut g = grid();
        g.set_cell(Coord::new(0, 0), Cell::owned(CompetitorId(1), 1)).unwrap();
        g.set_cell(Coord::new(0, 5), Cell::owned(CompetitorId(3), 1)).unwrap();
        let roster = Roster::sequential(3).unwrap();

        assert_eq!(next_actor(CompetitorId(1), &roster, &g, 10), CompetitorId(3));
        assert_eq!(next_actor(CompetitorId(3), &roster, &g, 10), CompetitorId(1));
        assert_eq!(next_actor(CompetitorId(2), &roster, &g, 10), CompetitorId(3));
    }

    #[test]
    fn test_single_survivor_keeps_turn() {
        let mut g = grid();
        g.set_cell(Coord::new(4, 4), Cell::owned(CompetitorId(2), 2)).unwrap();
        let roster = Roster::sequential(3).unwrap();

        assert_eq!(next_actor(CompetitorId(2), &roster, &g, 10), CompetitorId(2));
        assert_eq!(next_actor(CompetitorId(1), &roster, &g, 10), CompetitorId(2));
    }

    #[test]
    fn test_nobody_alive_returns_current() {
        let g = grid();
        let roster = Roster::sequential(2).unwrap();
        assert_eq!(next_actor(CompetitorId(2), &roster, &g, 10), CompetitorId(2));
    }

    #[test]
    fn test_unknown_current_starts_at_top() {
        let g = grid();
        let roster = Roster::sequential(2).unwrap();
        assert_eq!(next_actor(CompetitorId(4), &roster, &g, 0), CompetitorId(1));
    }

    #[test]
    fn test_advance_passes_turn() {
        let mut g = grid();
        let mut turn = TurnState::new(Roster::sequential(2).unwrap()).unwrap();
        assert_eq!(turn.current_actor, CompetitorId(1));

        g.set_cell(Coord::new(0, 0), Cell::owned(CompetitorId(1), 1)).unwrap();
        assert_eq!(turn.advance(&g), Verdict::Undecided);
        assert_eq!(turn.current_actor, CompetitorId(2));
        assert_eq!(turn.moves_made, 1);

        g.set_cell(Coord::new(8, 5), Cell::owned(CompetitorId(2), 1)).unwrap();
        assert_eq!(turn.advance(&g), Verdict::Undecided);
        assert_eq!(turn.current_actor, CompetitorId(1));
        assert_eq!(turn.phase(), Phase::SteadyState);
    }

    #[test]
    fn test_advance_declares_winner_and_freezes_actor() {
        let mut g = grid();
        let mut turn = TurnState::new(Roster::sequential(2).unwrap()).unwrap();
        turn.moves_made = 4;
        turn.current_actor = CompetitorId(1);
        g.set_cell(Coord::new(0, 0), Cell::owned(CompetitorId(1), 1)).unwrap();

        assert_eq!(turn.advance(&g), Verdict::Survivor(CompetitorId(1)));
        assert!(turn.is_finished());
        assert_eq!(turn.winner, Some(CompetitorId(1)));
        assert_eq!(turn.current_actor, CompetitorId(1));
    }

    #[test]
    fn test_turn_state_serialization() {
        let turn = TurnState::new(Roster::sequential(3).unwrap()).unwrap();
        let json = serde_json::to_string(&turn).unwrap();
        let back: TurnState = serde_json::from_str(&json).unwrap();
        assert_eq!(turn, back);
    }
}
