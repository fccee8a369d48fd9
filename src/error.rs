//! Error types for the engine.

use thiserror::Error;

use crate::core::CompetitorId;
use crate::grid::Coord;

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// Every way an engine call can be rejected.
///
/// A rejected call never mutates the grid or turn state. Cascade anomalies
/// and the zero-survivor fallback are not errors: see
/// [`CascadeAnomaly`](crate::cascade::CascadeAnomaly) and
/// [`Verdict::Degenerate`](crate::rules::Verdict::Degenerate).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside the grid.
    #[error("Coordinate ({row}, {col}) is outside the {rows} x {cols} grid")]
    OutOfBounds {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },

    /// Cell belongs to another competitor.
    #[error("{competitor} cannot place on {coord}, owned by {owner}")]
    IllegalOwner {
        /// Target cell.
        coord: Coord,
        /// Current owner.
        owner: CompetitorId,
        /// Competitor attempting the placement.
        competitor: CompetitorId,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Placement by someone other than the current actor.
    #[error("Out of turn: expected {expected}, got {got}")]
    OutOfTurn {
        /// Current actor.
        expected: CompetitorId,
        /// Competitor that tried to move.
        got: CompetitorId,
    },

    /// Placement after the match was decided.
    #[error("Match already won by {winner}")]
    MatchFinished {
        /// Declared winner.
        winner: CompetitorId,
    },

    /// Move intent arrived with an unexpected sequence number.
    #[error("Move sequence mismatch: expected {expected}, got {got}")]
    SequenceMismatch {
        /// Next sequence the session accepts.
        expected: u64,
        /// Sequence carried by the intent.
        got: u64,
    },

    /// Snapshot could not be decoded or is inconsistent.
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Snapshot(err.to_string())
    }
}
