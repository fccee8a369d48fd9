//! Move intents, move log entries and placement reports.

use serde::{Deserialize, Serialize};

use crate::cascade::CascadeOutcome;
use crate::core::CompetitorId;
use crate::grid::Coord;
use crate::rules::Verdict;

/// An ordered move from the network layer.
///
/// The relay assigns `sequence` starting at 0 and increments it once per
/// accepted move, so it always equals the number of completed placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Position in the match's move order.
    pub sequence: u64,
    /// Target cell.
    pub coord: Coord,
    /// Competitor placing.
    pub competitor: CompetitorId,
}

/// One entry of the match move log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Position in the match's move order.
    pub sequence: u64,
    /// Target cell.
    pub coord: Coord,
    /// Competitor that placed.
    pub competitor: CompetitorId,
    /// Explosions the placement triggered.
    pub explosions: usize,
}

impl MoveRecord {
    /// The intent that reproduces this move.
    #[must_use]
    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            sequence: self.sequence,
            coord: self.coord,
            competitor: self.competitor,
        }
    }
}

/// What a host gets back from an accepted placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Sequence number assigned to this move.
    pub sequence: u64,
    /// Target cell.
    pub coord: Coord,
    /// Competitor that placed.
    pub competitor: CompetitorId,
    /// Ordered explosion log and anomaly, if any.
    pub outcome: CascadeOutcome,
    /// Winner evaluation after the placement.
    pub verdict: Verdict,
    /// Who moves next; `None` once the match is decided.
    pub next_actor: Option<CompetitorId>,
}

impl PlacementReport {
    /// Declared winner, if this placement decided the match.
    #[must_use]
    pub fn winner(&self) -> Option<CompetitorId> {
        self.verdict.winner()
    }
}
