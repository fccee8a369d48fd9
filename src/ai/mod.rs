//! Move selection for computer-controlled competitors.
//!
//! Scoring lives in [`heuristic`]; choosing among scored candidates and the
//! pluggable [`MovePolicy`] trait live in [`policy`]. All randomness comes
//! from an injected [`GameRng`](crate::core::GameRng).

pub mod heuristic;
pub mod policy;

pub use heuristic::{score_move, static_score, HeuristicWeights};
pub use policy::{
    find_best_move, ranked_moves, HeuristicPolicy, MovePolicy, RandomPolicy, SelectorConfig,
};
