//! Turn and elimination state machine.
//!
//! After every settled placement the caller evaluates the grid for a winner
//! and, only if there is none, passes the turn. [`TurnState::advance`] does
//! both in that order.

pub mod elimination;
pub mod turn;

pub use elimination::{alive_competitors, check_winner, evaluate, Verdict};
pub use turn::{next_actor, Phase, TurnState};
