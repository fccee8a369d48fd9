//! Lossless match snapshots for save/resume and peer re-sync.
//!
//! A snapshot carries the config, every cell, the full turn state, the move
//! log and the match RNG position. Encoding is `bincode`; hosts that prefer
//! another format can serialize [`MatchSnapshot`] with any serde backend.

use serde::{Deserialize, Serialize};

use crate::core::{GameRngState, MatchConfig};
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::rules::{check_winner, TurnState};

use super::record::MoveRecord;

/// Serializable copy of a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Configuration the match was started with.
    pub config: MatchConfig,
    /// Every cell, row-major.
    pub grid: Grid,
    /// Turn state, including any declared winner.
    pub turn: TurnState,
    /// Accepted moves in order.
    pub history: Vec<MoveRecord>,
    /// Match RNG position, so bot turns resume identically.
    pub rng: GameRngState,
}

impl MatchSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode with bincode and check consistency.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check that the parts describe one coherent match.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;

        if self.grid.config() != self.config.grid {
            return Err(EngineError::Snapshot(format!(
                "grid is {} x {}, config says {} x {}",
                self.grid.rows(),
                self.grid.cols(),
                self.config.grid.rows,
                self.config.grid.cols
            )));
        }
        if self.turn.roster != self.config.roster {
            return Err(EngineError::Snapshot("turn roster differs from config".to_string()));
        }
        if !self.config.roster.contains(self.turn.current_actor) {
            return Err(EngineError::Snapshot(format!(
                "current actor {} is not in the roster",
                self.turn.current_actor
            )));
        }
        if let Some(winner) = self.turn.winner {
            if !self.config.roster.contains(winner) {
                return Err(EngineError::Snapshot(format!("winner {winner} is not in the roster")));
            }
        }
        if let Some((coord, owner)) = self.grid.iter().find_map(|(coord, cell)| {
            cell.owner()
                .filter(|owner| !self.config.roster.contains(*owner))
                .map(|owner| (coord, owner))
        }) {
            return Err(EngineError::Snapshot(format!(
                "cell {coord} is owned by {owner}, who is not in the roster"
            )));
        }
        let derived = check_winner(&self.grid, &self.turn.roster, self.turn.moves_made);
        if derived != self.turn.winner {
            return Err(EngineError::Snapshot(format!(
                "recorded winner {:?} contradicts the grid ({:?})",
                self.turn.winner, derived
            )));
        }
        if self.history.len() as u64 != self.turn.moves_made {
            return Err(EngineError::Snapshot(format!(
                "{} logged moves but moves_made is {}",
                self.history.len(),
                self.turn.moves_made
            )));
        }
        if self
            .history
            .iter()
            .enumerate()
            .any(|(i, record)| record.sequence != i as u64)
        {
            return Err(EngineError::Snapshot("move log sequence has gaps".to_string()));
        }
        Ok(())
    }
}
