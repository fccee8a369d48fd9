//! A running match: one grid, one turn state, one writer.
//!
//! `Match` is the surface hosts call. Every accepted placement runs to a
//! settled grid (or the step bound) before the call returns, so no
//! intermediate cascade state is ever visible to another caller. Hosts that
//! receive placements from several sources must serialize them first.

use im::Vector;
use rustc_hash::FxHasher;
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

use crate::ai::MovePolicy;
use crate::cascade::CascadeResolver;
use crate::core::{CompetitorId, GameRng, MatchConfig, MAX_COMPETITORS};
use crate::error::{EngineError, Result};
use crate::grid::{Coord, Grid};
use crate::rules::{alive_competitors, Phase, TurnState};

use super::record::{MoveIntent, MoveRecord, PlacementReport};
use super::snapshot::MatchSnapshot;

/// A match session.
#[derive(Clone, Debug)]
pub struct Match {
    config: MatchConfig,
    resolver: CascadeResolver,
    grid: Grid,
    turn: TurnState,
    history: Vector<MoveRecord>,
    rng: GameRng,
}

impl Match {
    /// Start a match: empty grid, first roster entry to move.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: CascadeResolver::new(config.max_cascade_steps),
            grid: Grid::new(config.grid)?,
            turn: TurnState::new(config.roster.clone())?,
            history: Vector::new(),
            rng: GameRng::new(config.seed),
            config,
        })
    }

    // === Accessors ===

    /// Match configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Current grid. Always settled unless the last cascade hit the bound.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Turn state.
    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Competitor expected to move.
    #[must_use]
    pub fn current_actor(&self) -> CompetitorId {
        self.turn.current_actor
    }

    /// Completed placements.
    #[must_use]
    pub fn moves_made(&self) -> u64 {
        self.turn.moves_made
    }

    /// Turn phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.turn.phase()
    }

    /// Declared winner.
    #[must_use]
    pub fn winner(&self) -> Option<CompetitorId> {
        self.turn.winner
    }

    /// True once a winner is declared.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.turn.is_finished()
    }

    /// Roster entries still holding cells.
    #[must_use]
    pub fn alive(&self) -> SmallVec<[CompetitorId; MAX_COMPETITORS]> {
        alive_competitors(&self.grid, &self.turn.roster)
    }

    /// Ordered log of accepted moves.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    // === Placements ===

    /// Grid-level legality: in bounds and not owned by an opponent.
    #[must_use]
    pub fn validate_placement(&self, coord: Coord, competitor: CompetitorId) -> bool {
        self.grid.validate_placement(coord, competitor)
    }

    fn check_turn(&self, competitor: CompetitorId) -> Result<()> {
        if let Some(winner) = self.turn.winner {
            return Err(EngineError::MatchFinished { winner });
        }
        if competitor != self.turn.current_actor {
            return Err(EngineError::OutOfTurn {
                expected: self.turn.current_actor,
                got: competitor,
            });
        }
        Ok(())
    }

    /// Apply a placement by the current actor and settle the grid.
    ///
    /// Rejections leave the match untouched.
    pub fn apply_placement(&mut self, coord: Coord, competitor: CompetitorId) -> Result<PlacementReport> {
        if let Err(err) = self.check_turn(competitor) {
            tracing::warn!(%coord, competitor = competitor.raw(), error = %err, "Placement rejected");
            return Err(err);
        }

        let outcome = match self
            .resolver
            .apply_placement_and_resolve(&mut self.grid, coord, competitor)
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(%coord, competitor = competitor.raw(), error = %err, "Placement rejected");
                return Err(err);
            }
        };

        let sequence = self.turn.moves_made;
        let verdict = self.turn.advance(&self.grid);
        self.history.push_back(MoveRecord {
            sequence,
            coord,
            competitor,
            explosions: outcome.explosion_count(),
        });

        if let Some(winner) = verdict.winner() {
            tracing::debug!(winner = winner.raw(), moves = self.turn.moves_made, "Match decided");
        }

        Ok(PlacementReport {
            sequence,
            coord,
            competitor,
            outcome,
            verdict,
            next_actor: if verdict.winner().is_some() {
                None
            } else {
                Some(self.turn.current_actor)
            },
        })
    }

    /// Apply an ordered move from the network layer.
    ///
    /// `intent.sequence` must equal [`moves_made`](Self::moves_made), so a
    /// duplicated or reordered intent is rejected instead of applied twice.
    pub fn apply_intent(&mut self, intent: MoveIntent) -> Result<PlacementReport> {
        let expected = self.turn.moves_made;
        if intent.sequence != expected {
            let err = EngineError::SequenceMismatch {
                expected,
                got: intent.sequence,
            };
            tracing::warn!(error = %err, "Move intent rejected");
            return Err(err);
        }
        self.apply_placement(intent.coord, intent.competitor)
    }

    /// What `policy` would play for the current actor. Does not mutate the match.
    #[must_use]
    pub fn suggest_move(&self, policy: &dyn MovePolicy, rng: &mut GameRng) -> Option<Coord> {
        if self.is_finished() {
            return None;
        }
        policy.choose(&self.grid, self.turn.current_actor, rng)
    }

    /// Let `policy` play the current actor's turn with the match RNG.
    ///
    /// Returns `Ok(None)` when the actor has no legal cell.
    pub fn play_policy_turn(&mut self, policy: &dyn MovePolicy) -> Result<Option<PlacementReport>> {
        if let Some(winner) = self.turn.winner {
            return Err(EngineError::MatchFinished { winner });
        }
        let actor = self.turn.current_actor;
        match policy.choose(&self.grid, actor, &mut self.rng) {
            Some(coord) => self.apply_placement(coord, actor).map(Some),
            None => Ok(None),
        }
    }

    // === Lifecycle ===

    /// Start a new round with the same config. The match RNG keeps its position.
    pub fn reset(&mut self) -> Result<()> {
        self.grid = Grid::new(self.config.grid)?;
        self.turn = TurnState::new(self.config.roster.clone())?;
        self.history = Vector::new();
        tracing::debug!("Round reset");
        Ok(())
    }

    /// Rebuild a match by re-applying logged moves in order.
    pub fn replay<'a>(
        config: MatchConfig,
        records: impl IntoIterator<Item = &'a MoveRecord>,
    ) -> Result<Self> {
        let mut game = Self::new(config)?;
        for record in records {
            game.apply_intent(record.intent())?;
        }
        Ok(game)
    }

    /// Digest of grid and turn state for cheap desync checks between peers.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.grid.hash(&mut hasher);
        self.turn.hash(&mut hasher);
        hasher.finish()
    }

    // === Snapshots ===

    /// Capture the full match state.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            config: self.config.clone(),
            grid: self.grid.clone(),
            turn: self.turn.clone(),
            history: self.history.iter().copied().collect(),
            rng: self.rng.state(),
        }
    }

    /// Resume from a snapshot.
    pub fn restore(snapshot: MatchSnapshot) -> Result<Self> {
        snapshot.validate()?;
        tracing::debug!(moves = snapshot.turn.moves_made, "Restoring match from snapshot");
        Ok(Self {
            resolver: CascadeResolver::new(snapshot.config.max_cascade_steps),
            grid: snapshot.grid,
            turn: snapshot.turn,
            history: snapshot.history.into_iter().collect(),
            rng: GameRng::from_state(&snapshot.rng),
            config: snapshot.config,
        })
    }
}
